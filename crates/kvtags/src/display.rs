//! Display and suggestion data types shared by all key-value types.

use serde::{Deserialize, Serialize};

/// Rendered form of a value: plain text or HTML markup.
///
/// Serializes as `{"text": "..."}` or `{"html": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    /// Plain text.
    Text(String),
    /// HTML markup.
    Html(String),
}

impl Display {
    /// Creates a plain text display.
    pub fn text(text: impl Into<String>) -> Self {
        Display::Text(text.into())
    }

    /// Creates an HTML display.
    pub fn html(html: impl Into<String>) -> Self {
        Display::Html(html.into())
    }

    /// Returns the display as plain text, stripping markup from HTML.
    pub fn plain_text(&self) -> String {
        match self {
            Display::Text(text) => text.clone(),
            Display::Html(html) => strip_tags(html),
        }
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// A candidate completion for the text currently being typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// How the suggestion is rendered.
    pub display: Display,

    /// The substring that justified including this suggestion.
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,

    /// `matched` with the typed input highlighted in `<b>` tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_html: Option<String>,

    /// Raw text that completes the entry when the suggestion is chosen.
    pub value: String,

    /// Additional hint text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,

    /// True when the suggestion was synthesized from the raw input.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl Suggestion {
    /// Creates a suggestion with a display and completion value.
    pub fn new(display: Display, value: impl Into<String>) -> Self {
        Self {
            display,
            matched: None,
            match_html: None,
            value: value.into(),
            extra: None,
            fallback: false,
        }
    }

    /// Creates a fallback suggestion synthesized from the raw input.
    pub fn fallback(display: Display, value: impl Into<String>) -> Self {
        Self {
            fallback: true,
            ..Self::new(display, value)
        }
    }

    /// Records the substring that matched.
    pub fn with_match(mut self, matched: impl Into<String>) -> Self {
        self.matched = Some(matched.into());
        self
    }

    /// Adds hint text.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}

/// An ordered list of suggestions with an optional header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionList {
    /// Header shown above the suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// The suggestions in display order.
    pub items: Vec<Suggestion>,
}

impl SuggestionList {
    /// Creates a list without a header.
    pub fn new(items: Vec<Suggestion>) -> Self {
        Self {
            header: None,
            items,
        }
    }

    /// Sets the header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Returns true if the list holds no suggestions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of suggestions.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_serializes_like_tagged_object() {
        let text = serde_json::to_value(Display::text("✓")).unwrap();
        assert_eq!(text, serde_json::json!({ "text": "✓" }));

        let html = serde_json::to_value(Display::html("<code>a</code>")).unwrap();
        assert_eq!(html, serde_json::json!({ "html": "<code>a</code>" }));
    }

    #[test]
    fn test_display_deserializes_from_tagged_object() {
        let display: Display = serde_json::from_str(r#"{"text": "Work"}"#).unwrap();
        assert_eq!(display, Display::text("Work"));
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let display = Display::html("<code>/</code>a&lt;b<code>/i</code>");
        assert_eq!(display.plain_text(), "/a<b/i");
    }

    #[test]
    fn test_suggestion_serialization_skips_empty_fields() {
        let suggestion = Suggestion::new(Display::text("Date"), "date");
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "display": { "text": "Date" }, "value": "date" })
        );
    }

    #[test]
    fn test_fallback_suggestion() {
        let suggestion = Suggestion::fallback(Display::text("Text: foo"), "foo").with_match("foo");
        assert!(suggestion.fallback);
        assert_eq!(suggestion.matched.as_deref(), Some("foo"));
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["match"], "foo");
        assert_eq!(value["fallback"], true);
    }
}

//! Tags picked from a configured vocabulary.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::display::{Display, Suggestion};

use super::ValueType;

/// A tag. Tags are equal when their `value` is equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Canonical identifier.
    pub value: String,
    /// Text used for editing and matching instead of `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_string: Option<String>,
    /// Display override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
}

impl Tag {
    /// Creates a tag shown as its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display: Some(Display::text(value.clone())),
            value,
            edit_string: None,
        }
    }

    pub fn with_edit_string(mut self, edit_string: impl Into<String>) -> Self {
        self.edit_string = Some(edit_string.into());
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    fn matches_exactly(&self, lowered: &str) -> bool {
        self.value.to_lowercase() == lowered
            || self
                .edit_string
                .as_ref()
                .is_some_and(|edit| edit.to_lowercase() == lowered)
    }

    /// Returns the field containing `lowered`, preferring the edit string.
    fn matched_field(&self, lowered: &str) -> Option<&str> {
        match &self.edit_string {
            Some(edit) if edit.to_lowercase().contains(lowered) => Some(edit.as_str()),
            _ if self.value.to_lowercase().contains(lowered) => Some(self.value.as_str()),
            _ => None,
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// A vocabulary entry: a bare value or a full tag table.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagSpec {
    Plain(String),
    Full(Tag),
}

impl From<TagSpec> for Tag {
    fn from(spec: TagSpec) -> Self {
        match spec {
            TagSpec::Plain(value) => Tag::new(value),
            TagSpec::Full(tag) => tag,
        }
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let specs = Vec::<TagSpec>::deserialize(deserializer)?;
    Ok(specs.into_iter().map(Tag::from).collect())
}

/// Vocabulary settings of a tag type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Known tags, in suggestion order.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<Tag>,
    /// Accept tags outside the vocabulary.
    #[serde(default)]
    pub allow_other: bool,
}

/// Parses tags from a vocabulary, optionally accepting unknown tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagType {
    config: TagConfig,
}

impl TagType {
    pub fn new(config: TagConfig) -> Self {
        Self { config }
    }

    /// Creates a tag type from plain values.
    pub fn from_values<I, S>(values: I, allow_other: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TagConfig {
            tags: values.into_iter().map(Tag::new).collect(),
            allow_other,
        })
    }

    pub fn tags(&self) -> &[Tag] {
        &self.config.tags
    }

    pub fn allow_other(&self) -> bool {
        self.config.allow_other
    }

    /// Vocabulary suggestions for `prefix`, leaving out tags in `taken`.
    pub fn suggestions_excluding(&self, prefix: &str, taken: &[&Tag]) -> Vec<Suggestion> {
        let lowered = prefix.to_lowercase();
        self.config
            .tags
            .iter()
            .filter(|tag| !taken.contains(tag))
            .filter_map(|tag| {
                let matched = tag.matched_field(&lowered)?;
                let suggestion = Suggestion::new(self.display(tag), tag.value.clone());
                Some(if prefix.is_empty() {
                    suggestion
                } else {
                    suggestion.with_match(matched)
                })
            })
            .collect()
    }
}

impl ValueType for TagType {
    type Value = Tag;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        self.suggestions_excluding(prefix, &[])
    }

    fn parse_str(&self, raw: &str) -> Option<Tag> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        if let Some(tag) = self.config.tags.iter().find(|tag| tag.matches_exactly(&lowered)) {
            return Some(tag.clone());
        }
        (self.config.allow_other && !trimmed.is_empty()).then(|| Tag::new(trimmed))
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<Tag> {
        self.parse_str(value.as_str()?)
    }

    fn display(&self, value: &Tag) -> Display {
        match &value.display {
            Some(display) => display.clone(),
            None => Display::text(self.edit_text(value)),
        }
    }

    fn edit_text(&self, value: &Tag) -> String {
        value
            .edit_string
            .clone()
            .unwrap_or_else(|| value.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> TagType {
        TagType::new(TagConfig {
            tags: vec![
                Tag::new("red"),
                Tag {
                    value: "grn".to_string(),
                    edit_string: Some("Green".to_string()),
                    display: None,
                },
                Tag::new("blue").with_display(Display::html("<i>blue</i>")),
            ],
            allow_other: false,
        })
    }

    #[test]
    fn test_parse_matches_value_and_edit_string() {
        let tags = colors();
        assert_eq!(tags.parse_str(" RED ").map(|t| t.value), Some("red".to_string()));
        assert_eq!(tags.parse_str("green").map(|t| t.value), Some("grn".to_string()));
        assert_eq!(tags.parse_str("GRN").map(|t| t.value), Some("grn".to_string()));
        assert_eq!(tags.parse_str("purple"), None);
    }

    #[test]
    fn test_allow_other_synthesizes_tags() {
        let tags = TagType::from_values(["a"], true);
        let tag = tags.parse_str(" Purple ").unwrap();
        assert_eq!(tag.value, "Purple");
        assert_eq!(tags.display(&tag), Display::text("Purple"));
        assert_eq!(tags.parse_str("  "), None);
    }

    #[test]
    fn test_equality_by_value_only() {
        let plain = Tag::new("x");
        let decorated = Tag::new("x")
            .with_edit_string("Ex")
            .with_display(Display::text("✗"));
        assert_eq!(plain, decorated);
        assert_ne!(plain, Tag::new("y"));
    }

    #[test]
    fn test_display_and_edit_text() {
        let tags = colors();
        let green = tags.parse_str("green").unwrap();
        assert_eq!(tags.display(&green), Display::text("Green"));
        assert_eq!(tags.edit_text(&green), "Green");
        assert_eq!(tags.parse_str(&tags.edit_text(&green)), Some(green));

        let blue = tags.parse_str("blue").unwrap();
        assert_eq!(tags.display(&blue), Display::html("<i>blue</i>"));
    }

    #[test]
    fn test_check_value_accepts_strings() {
        let tags = colors();
        assert_eq!(tags.check_value(&json!("red")).map(|t| t.value), Some("red".to_string()));
        assert_eq!(tags.check_value(&json!({ "value": "red" })), None);
        assert_eq!(tags.check_value(&json!(1)), None);
    }

    #[test]
    fn test_suggestions_filter_by_substring() {
        let tags = colors();
        let suggestions = tags.suggestions("RE");
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["red", "grn"]);
        assert_eq!(suggestions[0].matched.as_deref(), Some("red"));
        assert_eq!(suggestions[1].matched.as_deref(), Some("Green"));
    }

    #[test]
    fn test_suggestions_without_prefix_have_no_match() {
        let suggestions = colors().suggestions("");
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|s| s.matched.is_none()));
    }

    #[test]
    fn test_suggestions_excluding_taken_tags() {
        let tags = colors();
        let red = Tag::new("red");
        let suggestions = tags.suggestions_excluding("", &[&red]);
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["grn", "blue"]);
    }

    #[test]
    fn test_config_accepts_plain_and_full_tags() {
        let config: TagConfig = serde_json::from_value(json!({
            "tags": ["red", { "value": "grn", "edit_string": "Green" }],
            "allow_other": true,
        }))
        .unwrap();
        assert_eq!(config.tags.len(), 2);
        assert_eq!(config.tags[0].display, Some(Display::text("red")));
        assert_eq!(config.tags[1].edit_string.as_deref(), Some("Green"));
        assert!(config.allow_other);
    }
}

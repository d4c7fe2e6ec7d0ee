//! Text searches: plain literals, quoted phrases and `/pattern/flags`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::display::{Display, Suggestion};
use crate::query::RegexSelector;
use crate::text::{escape_html, escape_regex_chars, is_closed_quote, quote, unquote};

use super::ValueType;

static SLASHED_REGEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(.*)/([a-z]*)$")
        .unwrap_or_else(|_| unreachable!("slashed regex pattern is valid"))
});

/// Flags accepted after the closing slash.
const REGEX_FLAGS: &str = "gimsuy";

/// Flags applied to literal searches.
const LITERAL_FLAGS: &str = "i";

/// A search pattern with the text it was typed as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexValue {
    /// The input as typed, without surrounding quotes.
    pub text: String,
    /// HTML-escaped pattern, set only for `/pattern/flags` input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_regex: Option<String>,
    /// The pattern to search with.
    pub regex: String,
    /// Pattern flags.
    pub options: String,
}

impl RegexValue {
    /// Creates a literal search that matches `text` case-insensitively.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            regex: escape_regex_chars(&text),
            text,
            print_regex: None,
            options: LITERAL_FLAGS.to_string(),
        }
    }

    /// Returns true if the value came from `/pattern/flags` input.
    pub fn is_pattern(&self) -> bool {
        self.print_regex.is_some()
    }
}

fn valid_flags(flags: &str) -> bool {
    flags
        .char_indices()
        .all(|(i, flag)| REGEX_FLAGS.contains(flag) && !flags[..i].contains(flag))
}

fn compiles(pattern: &str, flags: &str) -> bool {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .is_ok()
}

/// Parses search text. `/pattern/flags` input with a valid pattern is kept
/// as a regular expression; anything else is searched for literally.
///
/// Patterns are validated with the `regex` crate, which has no lookaround
/// and no backreferences. Patterns using them, such as `/a(?=b)/` or
/// `/(a)\1/`, are not rejected: they are searched for literally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexType;

impl RegexType {
    pub fn new() -> Self {
        Self
    }

    /// Builds the regex selector for a value.
    pub fn selector_for(value: &RegexValue) -> RegexSelector {
        RegexSelector {
            pattern: value.regex.clone(),
            flags: value.options.clone(),
        }
    }

    fn example(&self, text: &str, extra: &str) -> Option<Suggestion> {
        let value = self.parse_str(text)?;
        Some(Suggestion::new(self.display(&value), text).with_extra(extra))
    }
}

impl ValueType for RegexType {
    type Value = RegexValue;

    fn suggestions(&self, _prefix: &str) -> Vec<Suggestion> {
        [
            ("abc", "Simple search"),
            ("\"Hello world!\"", "\"...\" for spaces"),
            ("/[a-c0-9]/i", "RegEx"),
        ]
        .into_iter()
        .filter_map(|(text, extra)| self.example(text, extra))
        .collect()
    }

    fn parse_str(&self, raw: &str) -> Option<RegexValue> {
        let trimmed = raw.trim();
        let text = if is_closed_quote(trimmed) {
            unquote(trimmed)
        } else {
            trimmed.to_string()
        };
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = SLASHED_REGEX_RE.captures(&text) {
            let pattern = caps.get(1).map_or("", |m| m.as_str());
            let flags = caps.get(2).map_or("", |m| m.as_str());
            if valid_flags(flags) && compiles(pattern, flags) {
                return Some(RegexValue {
                    print_regex: Some(escape_html(pattern)),
                    regex: pattern.to_string(),
                    options: flags.to_string(),
                    text,
                });
            }
        }

        Some(RegexValue::literal(text))
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<RegexValue> {
        serde_json::from_value(value.clone()).ok()
    }

    fn display(&self, value: &RegexValue) -> Display {
        match &value.print_regex {
            Some(print) => Display::html(format!(
                "<code>/</code>{print}<code>/{}</code>",
                value.options
            )),
            None => Display::text(value.text.clone()),
        }
    }

    fn edit_text(&self, value: &RegexValue) -> String {
        if value.text.contains(char::is_whitespace) || value.text.starts_with('"') {
            quote(&value.text)
        } else {
            value.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_is_escaped_and_case_insensitive() {
        let value = RegexType::new().parse_str("a.b").unwrap();
        assert_eq!(value.regex, "a\\.b");
        assert_eq!(value.options, "i");
        assert_eq!(value.print_regex, None);
        assert!(!value.is_pattern());
    }

    #[test]
    fn test_slashed_pattern_is_kept_verbatim() {
        let value = RegexType::new().parse_str("/a.b/i").unwrap();
        assert_eq!(value.regex, "a.b");
        assert_eq!(value.options, "i");
        assert_eq!(value.print_regex.as_deref(), Some("a.b"));
        assert_eq!(value.text, "/a.b/i");
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let value = RegexType::new().parse_str("/a(b/").unwrap();
        assert_eq!(value.regex, "/a\\(b/");
        assert_eq!(value.options, "i");
        assert!(!value.is_pattern());
    }

    #[test]
    fn test_invalid_flags_fall_back_to_literal() {
        assert!(!RegexType::new().parse_str("/ab/ii").unwrap().is_pattern());
        assert!(!RegexType::new().parse_str("/ab/x").unwrap().is_pattern());
        assert!(RegexType::new().parse_str("/ab/gim").unwrap().is_pattern());
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(RegexType::new().parse_str("   "), None);
        assert_eq!(RegexType::new().parse_str("\"\""), None);
    }

    #[test]
    fn test_print_regex_escapes_html() {
        let regex = RegexType::new();
        let value = regex.parse_str("/<b>/").unwrap();
        assert_eq!(value.print_regex.as_deref(), Some("&lt;b&gt;"));
        assert_eq!(
            regex.display(&value),
            Display::html("<code>/</code>&lt;b&gt;<code>/</code>")
        );
    }

    #[test]
    fn test_edit_text_quotes_whitespace() {
        let regex = RegexType::new();
        let value = RegexValue::literal("say \"hi\" now");
        assert_eq!(regex.edit_text(&value), "\"say \\\"hi\\\" now\"");
        assert_eq!(regex.parse_str(&regex.edit_text(&value)), Some(value));
    }

    #[test]
    fn test_edit_text_quotes_leading_quote() {
        let regex = RegexType::new();
        let value = regex.parse_str("\"\"a\"\"").unwrap();
        assert_eq!(value.text, "\"a\"");
        assert_eq!(regex.edit_text(&value), "\"\\\"a\\\"\"");
        assert_eq!(regex.parse_str(&regex.edit_text(&value)), Some(value));
    }

    #[test]
    fn test_unsupported_pattern_syntax_falls_back_to_literal() {
        let regex = RegexType::new();
        for raw in ["/a(?=b)/", "/(a)\\1/"] {
            let value = regex.parse_str(raw).unwrap();
            assert!(!value.is_pattern(), "{raw} should be literal");
            assert_eq!(value, RegexValue::literal(raw));
        }
    }

    #[test]
    fn test_check_value() {
        let regex = RegexType::new();
        let value = regex
            .check_value(&json!({ "text": "x", "regex": "x", "options": "i" }))
            .unwrap();
        assert_eq!(value, RegexValue::literal("x"));
        assert_eq!(regex.check_value(&json!({ "text": "x" })), None);
    }

    #[test]
    fn test_suggestions_are_fixed_examples() {
        let suggestions = RegexType::new().suggestions("anything");
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["abc", "\"Hello world!\"", "/[a-c0-9]/i"]);
        assert!(suggestions.iter().all(|s| s.extra.is_some()));
        assert_eq!(
            suggestions[2].display,
            Display::html("<code>/</code>[a-c0-9]<code>/i</code>")
        );
    }
}

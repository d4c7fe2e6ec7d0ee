//! Suggestion and type list output formatting.

use std::sync::Arc;

use kvtags_rs::display::{Display, SuggestionList};
use kvtags_rs::types::KeyValueType;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_display, format_highlight, pad, truncate_str};

/// Formats suggestions as JSON. No suggestions serialize as `null`.
pub fn format_suggestions_json(list: Option<&SuggestionList>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&list)
}

/// Formats suggestions as a list.
pub fn format_suggestions_table(list: Option<&SuggestionList>, use_colors: bool) -> String {
    let Some(list) = list.filter(|list| !list.is_empty()) else {
        return "No suggestions.\n".to_string();
    };

    let mut output = String::new();

    if let Some(header) = &list.header {
        let header = Display::html(header.as_str()).plain_text();
        if use_colors {
            output.push_str(&format!("{}\n", header.dimmed()));
        } else {
            output.push_str(&header);
            output.push('\n');
        }
    }

    for suggestion in &list.items {
        let display = truncate_str(&format_display(&suggestion.display), 20);
        let display_len = display.chars().count();
        let mut line = pad(&display, display_len, 20);

        line.push(' ');
        line.push_str(&suggestion.value);

        if let Some(matched) = &suggestion.match_html {
            line.push_str(&format!("  [{}]", format_highlight(matched, use_colors)));
        } else if let Some(matched) = &suggestion.matched {
            line.push_str(&format!("  [{matched}]"));
        }

        if let Some(extra) = &suggestion.extra {
            if use_colors {
                line.push_str(&format!("  {}", extra.dimmed()));
            } else {
                line.push_str(&format!("  {extra}"));
            }
        }

        if suggestion.fallback {
            line.push_str(" (as typed)");
        }

        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// JSON output structure for a configured type.
#[derive(Serialize)]
pub struct TypeOutput<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub kind: &'static str,
    pub aliases: Vec<&'a str>,
    pub fallback: bool,
}

impl<'a> TypeOutput<'a> {
    fn new(key_type: &'a KeyValueType, fallback: Option<&KeyValueType>) -> Self {
        let mut aliases: Vec<&str> = Vec::new();
        for alias in key_type.aliases() {
            if !aliases.contains(&alias.as_str()) {
                aliases.push(alias);
            }
        }
        Self {
            id: key_type.id(),
            label: key_type.label(),
            kind: key_type.kind().name(),
            aliases,
            fallback: fallback.is_some_and(|f| f.is_same(key_type)),
        }
    }
}

/// Formats the configured types as JSON.
pub fn format_types_json(
    types: &[Arc<KeyValueType>],
    fallback: Option<&KeyValueType>,
) -> Result<String, serde_json::Error> {
    let output: Vec<TypeOutput> = types.iter().map(|t| TypeOutput::new(t, fallback)).collect();
    serde_json::to_string_pretty(&output)
}

/// Formats the configured types as a table.
pub fn format_types_table(
    types: &[Arc<KeyValueType>],
    fallback: Option<&KeyValueType>,
    use_colors: bool,
) -> String {
    if types.is_empty() {
        return "No types configured.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<12} {:<16} {:<16} {}", "ID", "Label", "Kind", "Aliases");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for key_type in types {
        let row = TypeOutput::new(key_type, fallback);
        let marker = if row.fallback { " *" } else { "" };
        let id = truncate_str(row.id, 12);
        let id_len = id.chars().count();
        let id = if use_colors { id.cyan().to_string() } else { id };

        let line = format!(
            "{} {:<16} {:<16} {}{}",
            pad(&id, id_len, 12),
            truncate_str(row.label, 16),
            row.kind,
            row.aliases.join(", "),
            marker
        );
        output.push_str(&line);
        output.push('\n');
    }

    if fallback.is_some() {
        output.push_str("\n* used for text typed without a key\n");
    }

    output
}

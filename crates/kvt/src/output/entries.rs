//! Entry and query fragment output formatting.

use kvtags_rs::entry::Entry;
use kvtags_rs::query::{QueryFragment, SortSpecifier};
use kvtags_rs::types::KeyValue;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_display, format_number, format_relative_date, pad, truncate_str};

/// JSON output structure for the parse command.
#[derive(Serialize)]
pub struct ParseOutput<'a> {
    pub entries: Vec<EntryOutput<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_entries: Vec<EntryOutput<'a>>,
    pub leftover: &'a str,
}

/// JSON output structure for a single entry.
#[derive(Serialize)]
pub struct EntryOutput<'a> {
    pub key: &'a str,
    pub label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a KeyValue>,
}

impl<'a> EntryOutput<'a> {
    fn from_entry(entry: &'a Entry) -> Self {
        Self {
            key: entry.id(),
            label: entry.label(),
            display: entry.display().map(|d| format_display(&d)),
            edit_text: entry.edit_text(),
            value: entry.value(),
        }
    }
}

/// Formats parsed entries as JSON.
pub fn format_entries_json(
    entries: &[Entry],
    default_entries: &[Entry],
    leftover: &str,
) -> Result<String, serde_json::Error> {
    let output = ParseOutput {
        entries: entries.iter().map(EntryOutput::from_entry).collect(),
        default_entries: default_entries.iter().map(EntryOutput::from_entry).collect(),
        leftover,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats parsed entries as a table.
pub fn format_entries_table(
    entries: &[Entry],
    default_entries: &[Entry],
    leftover: &str,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    if entries.is_empty() && default_entries.is_empty() {
        output.push_str("No entries parsed.\n");
    } else {
        let header = format!("{:<16} {:<16} {}", "Key", "Display", "Edit text");
        if use_colors {
            output.push_str(&format!("{}\n", header.dimmed()));
        } else {
            output.push_str(&header);
            output.push('\n');
        }

        for entry in entries {
            output.push_str(&format_entry_line(entry, use_colors));
        }
        for entry in default_entries {
            output.push_str(&format_entry_line(entry, use_colors));
        }
    }

    if !leftover.is_empty() {
        let line = format!("Not parsed: {leftover}");
        if use_colors {
            output.push_str(&format!("{}\n", line.yellow()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

fn format_entry_line(entry: &Entry, use_colors: bool) -> String {
    let label = truncate_str(entry.label(), 16);
    let label_len = label.chars().count();
    let label = if use_colors {
        label.cyan().to_string()
    } else {
        label
    };
    let display = entry
        .display()
        .map(|d| truncate_str(&format_display(&d), 16))
        .unwrap_or_default();
    let display_len = display.chars().count();
    let edit_text = entry.edit_text().unwrap_or_default();
    let suffix = if entry.is_default() { " (default)" } else { "" };

    format!(
        "{} {} {}{}\n",
        pad(&label, label_len, 16),
        pad(&display, display_len, 16),
        edit_text,
        suffix
    )
}

/// JSON output structure for a query fragment.
#[derive(Serialize)]
pub struct QueryOutput<'a> {
    pub key: &'a str,
    pub fragment: &'a QueryFragment,
}

/// Formats query fragments as JSON.
pub fn format_queries_json(queries: &[(&str, QueryFragment)]) -> Result<String, serde_json::Error> {
    let output: Vec<QueryOutput> = queries
        .iter()
        .map(|(key, fragment)| QueryOutput { key: *key, fragment })
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Formats query fragments as a table.
pub fn format_queries_table(queries: &[(&str, QueryFragment)], use_colors: bool) -> String {
    if queries.is_empty() {
        return "No query fragments.\n".to_string();
    }

    let mut output = String::new();
    for (key, fragment) in queries {
        let key_text = if use_colors {
            key.cyan().to_string()
        } else {
            key.to_string()
        };
        output.push_str(&format!(
            "{} {}\n",
            pad(&key_text, key.chars().count(), 16),
            describe_fragment(fragment, use_colors)
        ));
    }
    output
}

/// Describes a fragment in one line, e.g. `gte 10` or `sort desc`.
fn describe_fragment(fragment: &QueryFragment, use_colors: bool) -> String {
    match fragment {
        QueryFragment::Number(selector) => {
            format!("{} {}", selector.key.as_str(), format_number(selector.operand))
        }
        QueryFragment::Date(selector) => format!(
            "{} {}",
            selector.key.as_str(),
            format_relative_date(selector.operand, use_colors)
        ),
        QueryFragment::Sort { order } => match order {
            SortSpecifier::Asc => "sort asc".to_string(),
            SortSpecifier::Desc => "sort desc".to_string(),
        },
        QueryFragment::Regex(selector) => {
            format!("matches /{}/{}", selector.pattern, selector.flags)
        }
        QueryFragment::Equals { value } => format!("eq {value}"),
    }
}

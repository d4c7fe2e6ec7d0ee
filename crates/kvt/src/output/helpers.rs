//! Common helper functions for output formatting.

use chrono::{Local, NaiveDate};
use kvtags_rs::display::Display;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Pads `s`, whose visible width is `visible_len`, to `width` columns.
pub fn pad(s: &str, visible_len: usize, width: usize) -> String {
    let padding = width.saturating_sub(visible_len);
    format!("{s}{}", " ".repeat(padding))
}

/// Renders a display as terminal text.
pub fn format_display(display: &Display) -> String {
    display.plain_text()
}

/// Renders `<b>` highlight markup, bolding the highlighted parts when
/// colors are enabled.
pub fn format_highlight(html: &str, use_colors: bool) -> String {
    let mut output = String::new();
    let mut rest = html;

    while let Some(start) = rest.find("<b>") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let (strong, remainder) = match after.find("</b>") {
            Some(end) => (&after[..end], &after[end + 4..]),
            None => (after, ""),
        };
        if use_colors {
            output.push_str(&strong.bold().to_string());
        } else {
            output.push_str(strong);
        }
        rest = remainder;
    }
    output.push_str(rest);
    output
}

/// Formats a date relative to today, e.g. `2024-05-01 (in 3 days)`.
pub fn format_relative_date(date: NaiveDate, use_colors: bool) -> String {
    format_relative_date_at(date, Local::now().date_naive(), use_colors)
}

fn format_relative_date_at(date: NaiveDate, today: NaiveDate, use_colors: bool) -> String {
    let days = (date - today).num_days();
    let relative = match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("in {d} days"),
    };
    let relative = format!("({relative})");
    let relative = if use_colors {
        relative.dimmed().to_string()
    } else {
        relative
    };
    format!("{} {}", date.format("%Y-%m-%d"), relative)
}

/// Formats a number without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

//! Suggestion lists for the text currently being typed.
//!
//! While a key has been chosen, suggestions come from the entry's type,
//! followed by the parsed input itself. Otherwise the list offers the
//! available types, plus the input as a value of the fallback type.

use std::sync::Arc;

use regex::{Captures, RegexBuilder};
use strsim::levenshtein;

use crate::display::{Display, Suggestion, SuggestionList};
use crate::entry::Entry;
use crate::types::KeyValueType;

/// Header shown above type suggestions.
pub const TYPE_LIST_HEADER: &str = "Confirm with <kbd>:</kbd> or pick from the list.";

/// Maximum Levenshtein distance to consider an alias as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// The entries a type looks at when building suggestions.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    /// Entries the user has added.
    pub entries: &'a [Entry],
    /// Entries supplied as defaults.
    pub default_entries: &'a [Entry],
    /// Whether a value may be added more than once.
    pub allow_duplicates: bool,
}

impl Default for SuggestionContext<'_> {
    fn default() -> Self {
        Self {
            entries: &[],
            default_entries: &[],
            allow_duplicates: true,
        }
    }
}

/// Wraps every case-insensitive occurrence of `input` in each suggestion's
/// `matched` text with `<b>` tags and stores the result in `match_html`.
pub fn highlight_matches(list: &mut SuggestionList, input: &str) {
    let pattern = RegexBuilder::new(&regex::escape(input))
        .case_insensitive(true)
        .build()
        .ok();
    for suggestion in &mut list.items {
        let Some(matched) = &suggestion.matched else {
            continue;
        };
        let html = match &pattern {
            Some(pattern) if !input.is_empty() => pattern
                .replace_all(matched, |caps: &Captures<'_>| format!("<b>{}</b>", &caps[0]))
                .into_owned(),
            _ => matched.clone(),
        };
        suggestion.match_html = Some(html);
    }
}

/// Suggestions for the value of a partial entry.
///
/// Returns `None` when there is nothing to suggest.
pub fn suggestions_for_entry(
    entry: &Entry,
    input: &str,
    context: &SuggestionContext<'_>,
) -> Option<SuggestionList> {
    let input = input.trim();
    let key_type = entry.key_type();
    let mut items = entry.suggestions(input, context);

    if let Some(parsed) = entry.parse(input) {
        if let (Some(display), Some(value)) =
            (key_type.display(&parsed), key_type.edit_text(&parsed))
        {
            items.push(Suggestion::fallback(display, value));
        }
    }
    if items.is_empty() {
        return None;
    }

    let mut list = SuggestionList::new(items);
    highlight_matches(&mut list, input);
    Some(list)
}

/// Suggestions for choosing a type.
///
/// With empty input every type is offered. Otherwise the types with an
/// alias containing the input are offered, followed by the input as a value
/// of `fallback` when there is one.
pub fn suggestions_for_types(
    types: &[Arc<KeyValueType>],
    input: &str,
    fallback: Option<&KeyValueType>,
) -> Option<SuggestionList> {
    let input = input.trim();
    let mut items: Vec<Suggestion> = if input.is_empty() {
        types
            .iter()
            .map(|key_type| Suggestion::new(Display::text(key_type.label()), key_type.id()))
            .collect()
    } else {
        types
            .iter()
            .filter_map(|key_type| {
                let alias = key_type.find_alias(input)?;
                Some(
                    Suggestion::new(Display::text(key_type.label()), key_type.id())
                        .with_match(alias),
                )
            })
            .collect()
    };

    if !input.is_empty() {
        if let Some(fallback) = fallback {
            items.push(Suggestion::fallback(
                Display::text(format!("{}: {}", fallback.label(), input)),
                input,
            ));
        }
    }
    if items.is_empty() && !input.is_empty() {
        return None;
    }

    let mut list = SuggestionList::new(items).with_header(TYPE_LIST_HEADER);
    highlight_matches(&mut list, input);
    Some(list)
}

/// Finds the alias closest to an unknown key for "did you mean" hints.
///
/// Exact matches and aliases further than a small edit distance away are
/// not suggested.
pub fn closest_alias(types: &[Arc<KeyValueType>], key: &str) -> Option<String> {
    let key_lower = key.to_lowercase();

    let (best_match, best_distance) = types
        .iter()
        .flat_map(|key_type| key_type.aliases())
        .filter(|alias| !alias.is_empty())
        .map(|alias| (alias.clone(), levenshtein(&key_lower, alias)))
        .min_by_key(|(_, distance)| *distance)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

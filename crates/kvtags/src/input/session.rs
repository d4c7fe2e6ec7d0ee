//! Session state and the operations that change it.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::construction::{create_entries_from_types, ConstructionData};
use crate::display::SuggestionList;
use crate::entry::Entry;
use crate::error::{KeyValueError, KeyValueResult};
use crate::suggest::{
    closest_alias, suggestions_for_entry, suggestions_for_types, SuggestionContext,
};
use crate::text::{is_closed_quote, unquote};
use crate::types::KeyValueType;

use super::InputMode;

/// Entries being edited through typed text.
#[derive(Debug, Clone)]
pub struct KeyValueInput {
    mode: InputMode,
    entries: Vec<Entry>,
    partial_entry: Option<Entry>,
    default_entries: Vec<Entry>,
    allow_duplicates: bool,
    revision: u64,
}

impl KeyValueInput {
    /// Creates a session for a single type.
    pub fn single(key_type: Arc<KeyValueType>) -> Self {
        Self::with_mode(InputMode::Single(key_type))
    }

    /// Creates a session accepting any of `types`.
    pub fn multiple(types: Vec<Arc<KeyValueType>>) -> Self {
        Self::with_mode(InputMode::Multiple {
            types,
            fallback_type: None,
        })
    }

    fn with_mode(mode: InputMode) -> Self {
        let mut input = Self {
            mode,
            entries: Vec::new(),
            partial_entry: None,
            default_entries: Vec::new(),
            allow_duplicates: true,
            revision: 0,
        };
        input.reset_partial_entry();
        input
    }

    /// Uses the type with id `id` for values typed without a key.
    ///
    /// # Errors
    ///
    /// Returns `KeyValueError::UnknownType` if no type has that id, and
    /// `KeyValueError::InvalidConfig` for single-type sessions.
    pub fn with_fallback_type(mut self, id: &str) -> KeyValueResult<Self> {
        let InputMode::Multiple {
            types,
            fallback_type,
        } = &mut self.mode
        else {
            return Err(KeyValueError::invalid_config(
                id,
                "single-type input has no fallback type",
            ));
        };
        let index = types
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| KeyValueError::unknown_type(id, closest_alias(types, id)))?;
        *fallback_type = Some(index);
        Ok(self)
    }

    /// Sets whether tag suggestions may repeat tags already entered.
    pub fn with_allow_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }

    /// Adds initial entries. Pairs that do not match a type are skipped.
    pub fn with_entries(mut self, pairs: &[ConstructionData]) -> Self {
        let entries = create_entries_from_types(pairs, self.mode.types());
        self.entries.extend(entries);
        self
    }

    /// Sets the default entries shown alongside the user's entries.
    pub fn with_default_entries(mut self, pairs: &[ConstructionData]) -> Self {
        self.default_entries = create_entries_from_types(pairs, self.mode.types())
            .into_iter()
            .map(Entry::into_default)
            .collect();
        self
    }

    // ===== Accessors =====

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn types(&self) -> &[Arc<KeyValueType>] {
        self.mode.types()
    }

    pub fn fallback_type(&self) -> Option<&Arc<KeyValueType>> {
        self.mode.fallback_type()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn default_entries(&self) -> &[Entry] {
        &self.default_entries
    }

    pub fn partial_entry(&self) -> Option<&Entry> {
        self.partial_entry.as_ref()
    }

    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Increases whenever the entry list changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The `{key, value}` pairs of the current entries.
    pub fn construction_data(&self) -> Vec<ConstructionData> {
        self.entries
            .iter()
            .filter_map(Entry::construction_data)
            .collect()
    }

    /// Type labels as a placeholder hint, e.g. `Done: / Price:`.
    ///
    /// Empty for single-type sessions.
    pub fn available_types_hint(&self) -> String {
        match &self.mode {
            InputMode::Single(_) => String::new(),
            InputMode::Multiple { types, .. } => {
                let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();
                format!("{}:", labels.join(": / "))
            }
        }
    }

    // ===== Editing =====

    fn reset_partial_entry(&mut self) {
        self.partial_entry = match &self.mode {
            InputMode::Single(key_type) => Some(key_type.create_partial_entry()),
            InputMode::Multiple { .. } => None,
        };
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
        trace!(revision = self.revision, entries = self.entries.len(), "Entries changed");
    }

    /// Starts an entry for the type named by `text`.
    ///
    /// Fails in single mode, while another entry is pending, or if no type
    /// has `text` as an alias.
    pub fn add_partial_entry(&mut self, text: &str) -> bool {
        if self.partial_entry.is_some() || self.mode.is_single() {
            return false;
        }
        let key = text.trim().to_lowercase();
        let entry = self
            .mode
            .types()
            .iter()
            .find_map(|key_type| key_type.try_create_partial_entry(&key));
        match entry {
            Some(entry) => {
                debug!(key = %entry.id(), "Started entry");
                self.partial_entry = Some(entry);
                true
            }
            None => false,
        }
    }

    /// Completes the pending entry with `text`.
    ///
    /// Without a pending entry the text is tried as a value of the fallback
    /// type and then as a type name. An entry equal to an existing one is
    /// not added again, but the call still succeeds.
    pub fn complete_entry(&mut self, text: &str) -> bool {
        let value = unquote(text);

        let entry = match self.partial_entry.take() {
            Some(mut partial) => {
                if !partial.set(&value) {
                    self.partial_entry = Some(partial);
                    return false;
                }
                self.reset_partial_entry();
                partial
            }
            None => {
                let fallback = self
                    .fallback_type()
                    .and_then(|key_type| key_type.try_create_full_entry(&value));
                match fallback {
                    Some(entry) => entry,
                    None => return self.add_partial_entry(&value),
                }
            }
        };

        if self.entries.iter().any(|existing| existing.equals(&entry)) {
            debug!(key = %entry.id(), "Skipping duplicate entry");
            return true;
        }
        debug!(key = %entry.id(), value = ?entry.edit_text(), "Added entry");
        self.entries.push(entry);
        self.bump_revision();
        true
    }

    /// Moves the last entry back into editing and returns its edit text.
    ///
    /// In multiple mode a pending entry without a value is dropped instead,
    /// returning its label.
    pub fn edit_last_entry(&mut self) -> String {
        if !self.mode.is_single() {
            if let Some(partial) = self.partial_entry.take() {
                return partial.label().to_string();
            }
        }

        let Some(mut last) = self.entries.pop() else {
            return String::new();
        };
        self.bump_revision();
        let edit_text = last.edit_text().unwrap_or_default();
        last.clear();
        self.partial_entry = Some(last);
        edit_text
    }

    /// Removes all entries equal to `entry`.
    pub fn remove_entry(&mut self, entry: &Entry) {
        let before = self.entries.len();
        self.entries.retain(|existing| !existing.equals(entry));
        if self.entries.len() != before {
            self.bump_revision();
        }
    }

    /// Removes every entry and any pending entry.
    pub fn remove_all_entries(&mut self) {
        self.entries.clear();
        self.reset_partial_entry();
        self.bump_revision();
    }

    // ===== Suggestions =====

    /// Suggestions for the text currently typed.
    pub fn suggestions(&self, input: &str) -> Option<SuggestionList> {
        let context = SuggestionContext {
            entries: &self.entries,
            default_entries: &self.default_entries,
            allow_duplicates: self.allow_duplicates,
        };
        match (&self.partial_entry, &self.mode) {
            (Some(entry), _) => suggestions_for_entry(entry, input, &context),
            (None, InputMode::Multiple { types, .. }) => suggestions_for_types(
                types,
                input,
                self.fallback_type().map(|key_type| key_type.as_ref()),
            ),
            (None, InputMode::Single(_)) => None,
        }
    }

    // ===== Typing =====

    /// Types a line of text and returns whatever could not be committed.
    ///
    /// A `:` commits the preceding text as a type name when it names one.
    /// Whitespace commits the preceding text as a value unless it is inside
    /// an open quoted token. The end of the line commits the rest.
    pub fn feed(&mut self, line: &str) -> String {
        let mut buffer = String::new();

        for c in line.chars() {
            if c == ':' {
                if self.add_partial_entry(&buffer) {
                    buffer.clear();
                } else {
                    buffer.push(c);
                }
            } else if c.is_whitespace() {
                let value = buffer.trim();
                if value.is_empty() {
                    continue;
                }
                buffer.push(c);
                let value = buffer.trim();
                if (!value.starts_with('"') || is_closed_quote(value))
                    && self.complete_entry(value)
                {
                    buffer.clear();
                }
            } else {
                buffer.push(c);
            }
        }

        let pending_key = self.partial_entry.is_some() && !self.mode.is_single();
        if (!buffer.trim().is_empty() || pending_key) && self.complete_entry(&buffer) {
            buffer.clear();
        }
        buffer.trim().to_string()
    }
}

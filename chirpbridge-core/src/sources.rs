// ABOUTME: Read-only registry mapping language keys to source account handles.
// ABOUTME: Lookup case-folds the language; handles keep their stored casing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language → handles mapping, loaded from the `[sources]` config table and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRegistry {
    entries: BTreeMap<String, Vec<String>>,
}

/// Outcome of a registry lookup. "Unknown language" and "known language with
/// no handles" get different user-facing hints.
#[derive(Debug, PartialEq, Eq)]
pub enum SourceLookup<'a> {
    Handles(&'a [String]),
    NoSources,
    UnknownLanguage,
}

impl SourceRegistry {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Look up the handles for a language, case-insensitively.
    pub fn lookup(&self, language: &str) -> SourceLookup<'_> {
        let needle = language.to_lowercase();
        let Some(handles) = self
            .entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == needle)
            .map(|(_, handles)| handles)
        else {
            return SourceLookup::UnknownLanguage;
        };

        if handles.is_empty() {
            SourceLookup::NoSources
        } else {
            SourceLookup::Handles(handles)
        }
    }

    /// Number of configured languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! A language-tagged table of translated messages.

use crate::i18n::LanguageId;
use std::collections::HashMap;

/// Immutable mapping from message key to localized string for one language.
///
/// Built once by a [`LanguageFileParser`](crate::i18n::LanguageFileParser) or
/// directly by the caller; the registry never mutates a set in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    language: LanguageId,
    entries: HashMap<String, String>,
}

impl LanguageSet {
    pub fn new(language: LanguageId, entries: HashMap<String, String>) -> Self {
        Self { language, entries }
    }

    /// Convenience constructor from borrowed pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key.
    pub fn from_pairs<'a>(
        language: impl Into<LanguageId>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self::new(language.into(), entries)
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

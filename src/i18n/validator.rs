//! Language-file validation.
//!
//! Checks a parsed-but-unvalidated language document before it becomes a
//! [`LanguageSet`](crate::i18n::LanguageSet). Errors reject the file;
//! warnings are logged and the file is still accepted.

use crate::i18n::LanguageId;
use std::collections::HashSet;

/// Validation report containing errors and warnings about a language file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the file unusable
    pub errors: Vec<String>,

    /// Suspicious but acceptable content
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for language-file contents.
pub struct LanguageFileValidator;

impl LanguageFileValidator {
    /// Validate a language code and its message entries.
    ///
    /// Entries are given in document order so duplicate keys can be reported.
    ///
    /// This function checks that:
    /// - the language code is well formed
    /// - every message key is non-empty and has no whitespace
    /// - no message key appears twice
    ///
    /// and warns when the file has no messages or a message value is empty.
    pub fn validate(language: &str, entries: &[(String, String)]) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !LanguageId::is_well_formed(language) {
            report
                .errors
                .push(format!("Malformed language code: '{}'", language));
        }

        if entries.is_empty() {
            report
                .warnings
                .push(format!("Language '{}' defines no messages", language));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (key, value) in entries {
            if key.is_empty() {
                report.errors.push("Empty message key".to_string());
                continue;
            }
            if key.chars().any(char::is_whitespace) {
                report
                    .errors
                    .push(format!("Message key '{}' contains whitespace", key));
            }
            if !seen.insert(key.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate message key '{}'", key));
            }
            if value.is_empty() {
                report
                    .warnings
                    .push(format!("Message '{}' has an empty value", key));
            }
        }

        report
    }
}

//! Language-file intake: sources, the parser seam, and the default JSON format.
//!
//! A source is read and parsed exactly once. The result is either a complete
//! [`LanguageSet`] or [`RegistryError::InvalidLanguageFile`]; there is no
//! separate "validate first, construct later" step.
//!
//! Default format:
//!
//! ```json
//! { "language": "de", "messages": { "greeting": "Hallo" } }
//! ```

use crate::error::{RegistryError, RegistryResult};
use crate::i18n::validator::LanguageFileValidator;
use crate::i18n::{LanguageId, LanguageSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a language file comes from.
#[derive(Debug, Clone)]
pub enum LanguageFileSource {
    /// A file on disk, read when parsed.
    Path(PathBuf),
    /// Bytes already in memory, with a label used in error messages.
    Bytes { origin: String, data: Vec<u8> },
}

impl LanguageFileSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        LanguageFileSource::Path(path.into())
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        LanguageFileSource::Bytes {
            origin: "<stream>".to_string(),
            data: data.into(),
        }
    }

    /// Drain a reader into memory.
    ///
    /// The stream is consumed once here, so later parsing can't observe a
    /// different payload than the one that was read.
    pub fn from_reader(mut reader: impl Read) -> RegistryResult<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| RegistryError::invalid_file("<stream>", e.to_string()))?;
        Ok(Self::from_bytes(data))
    }

    /// Label used in logs and error messages.
    pub fn origin(&self) -> String {
        match self {
            LanguageFileSource::Path(path) => path.display().to_string(),
            LanguageFileSource::Bytes { origin, .. } => origin.clone(),
        }
    }
}

impl From<&Path> for LanguageFileSource {
    fn from(path: &Path) -> Self {
        LanguageFileSource::from_path(path)
    }
}

impl From<PathBuf> for LanguageFileSource {
    fn from(path: PathBuf) -> Self {
        LanguageFileSource::Path(path)
    }
}

/// Turns raw language-file bytes into a [`LanguageSet`].
///
/// Implement `parse_bytes` to plug in another file format; `parse` handles
/// reading from disk.
pub trait LanguageFileParser: Send + Sync {
    fn parse_bytes(&self, origin: &str, data: &[u8]) -> RegistryResult<LanguageSet>;

    fn parse(&self, source: &LanguageFileSource) -> RegistryResult<LanguageSet> {
        match source {
            LanguageFileSource::Path(path) => {
                let origin = path.display().to_string();
                let data = fs::read(path)
                    .map_err(|e| RegistryError::invalid_file(origin.as_str(), e.to_string()))?;
                self.parse_bytes(&origin, &data)
            }
            LanguageFileSource::Bytes { origin, data } => self.parse_bytes(origin, data),
        }
    }
}

/// The default JSON language-file format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLanguageFileParser;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguageDocument {
    language: String,
    messages: MessageEntries,
}

/// Message entries in document order.
///
/// Deserializing into a map would silently drop duplicate keys; keeping the
/// raw pairs lets the validator report them.
#[derive(Debug, Default)]
struct MessageEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for MessageEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = MessageEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of message keys to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(MessageEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl LanguageFileParser for JsonLanguageFileParser {
    fn parse_bytes(&self, origin: &str, data: &[u8]) -> RegistryResult<LanguageSet> {
        let document: LanguageDocument = serde_json::from_slice(data)
            .map_err(|e| RegistryError::invalid_file(origin, e.to_string()))?;

        let report = LanguageFileValidator::validate(&document.language, &document.messages.0);
        if report.has_warnings() {
            warn!(
                "Language file {} ({}): {:?}",
                origin, document.language, report.warnings
            );
        }
        if report.has_errors() {
            return Err(RegistryError::invalid_file(origin, report.errors.join("; ")));
        }

        let language = LanguageId::new(&document.language);
        let entries = document.messages.0.into_iter().collect();
        let set = LanguageSet::new(language, entries);
        debug!(
            "Parsed language file {}: '{}' with {} messages",
            origin,
            set.language(),
            set.len()
        );
        Ok(set)
    }
}

/// Parse every `*.json` file in `dir`, in file-name order.
///
/// Fails on the first unreadable or invalid file.
pub fn load_language_dir(
    parser: &dyn LanguageFileParser,
    dir: &Path,
) -> RegistryResult<Vec<LanguageSet>> {
    let origin = dir.display().to_string();
    let read_dir =
        fs::read_dir(dir).map_err(|e| RegistryError::invalid_file(origin.as_str(), e.to_string()))?;

    let mut paths = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| RegistryError::invalid_file(origin.as_str(), e.to_string()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| parser.parse(&LanguageFileSource::Path(path)))
        .collect()
}

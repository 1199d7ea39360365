//! Identifier types: languages, tenants, and users.
//!
//! All three are opaque keys. Equality is exact; `en-US` and `en` are
//! different languages and nothing ever falls back from one to the other.

use anyhow::{bail, Result};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

static LANGUAGE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_code_regex() -> &'static Regex {
    LANGUAGE_CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,34}$").expect("language code pattern is valid")
    })
}

/// A language token such as `en`, `de` or `pt-BR`.
///
/// Cloning is cheap; the code is shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(Arc<str>);

impl LanguageId {
    /// Wrap a code without checking its shape.
    ///
    /// User selections go through here: a user may pick a language no tenant
    /// supports, and that is resolved by fallback rather than rejected.
    pub fn new(code: impl AsRef<str>) -> Self {
        LanguageId(Arc::from(code.as_ref()))
    }

    /// Create a LanguageId from a code, rejecting malformed codes.
    ///
    /// # Example
    /// ```
    /// use language_registry::LanguageId;
    ///
    /// let german = LanguageId::from_code("de").unwrap();
    /// assert_eq!(german.code(), "de");
    /// assert!(LanguageId::from_code("not a code").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<LanguageId> {
        if !Self::is_well_formed(code) {
            bail!("Malformed language code: '{}'", code);
        }
        Ok(LanguageId::new(code))
    }

    /// Whether `code` is an ASCII letter followed by up to 34 letters, digits,
    /// `-` or `_`.
    pub fn is_well_formed(code: &str) -> bool {
        language_code_regex().is_match(code)
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(code: &str) -> Self {
        LanguageId::new(code)
    }
}

/// Identity of a registered tenant (a client application instance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(Arc<str>);

impl TenantId {
    pub fn new(name: impl AsRef<str>) -> Self {
        TenantId(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(name: &str) -> Self {
        TenantId::new(name)
    }
}

impl From<String> for TenantId {
    fn from(name: String) -> Self {
        TenantId(Arc::from(name))
    }
}

/// Stable, globally unique user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        UserId(id)
    }

    /// A fresh random identifier.
    pub fn random() -> Self {
        UserId(Uuid::new_v4())
    }

    /// Parse a hyphenated or simple UUID string.
    pub fn parse(value: &str) -> Result<Self> {
        match Uuid::parse_str(value) {
            Ok(id) => Ok(UserId(id)),
            Err(e) => bail!("Invalid user id '{}': {}", value, e),
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        UserId(id)
    }
}

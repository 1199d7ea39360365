use crate::i18n::{LanguageId, TenantId};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Settings for the preview binary, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `*.json` language files
    pub language_dir: PathBuf,

    /// Language whose file becomes the tenant default
    pub default_language: LanguageId,

    /// Tenant the files are registered under
    pub tenant: TenantId,

    /// Optional language selected for the preview user
    pub preview_language: Option<LanguageId>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_language = std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            language_dir: std::env::var("LANGUAGE_DIR")
                .map(PathBuf::from)
                .context("LANGUAGE_DIR not set")?,

            default_language: LanguageId::from_code(&default_language)
                .context("DEFAULT_LANGUAGE is invalid")?,

            tenant: std::env::var("PREVIEW_TENANT")
                .map(TenantId::from)
                .unwrap_or_else(|_| TenantId::new("preview")),

            preview_language: std::env::var("PREVIEW_LANGUAGE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(LanguageId::new),
        })
    }
}

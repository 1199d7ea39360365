use crate::i18n::TenantId;
use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// A missing translation is never an error; resolution reports it as `None`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The language-file collaborator rejected the source.
    #[error("invalid language file {origin}: {reason}")]
    InvalidLanguageFile { origin: String, reason: String },

    /// `register_tenant` was called a second time for the same tenant.
    #[error("tenant '{0}' is already registered")]
    DuplicateTenant(TenantId),

    /// The tenant was never successfully registered.
    #[error("tenant '{0}' is not registered")]
    UnknownTenant(TenantId),
}

impl RegistryError {
    pub(crate) fn invalid_file(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::InvalidLanguageFile {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

//! Multi-tenant localization registry.
//!
//! Tenants (independently operated client applications) register language
//! files, users pick a language per tenant, and message keys are resolved for
//! a user with a fallback to the tenant's default language.

pub mod config;
pub mod error;
pub mod i18n;

pub use error::{RegistryError, RegistryResult};
pub use i18n::{
    LanguageFileParser, LanguageFileSource, LanguageId, LanguageRegistry, LanguageSet, TenantId,
    TenantLanguages, UserId,
};

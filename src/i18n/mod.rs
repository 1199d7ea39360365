//! Localization registry internals.
//!
//! # Architecture
//!
//! - `language`: identifier types for languages, tenants, and users
//! - `language_set`: an immutable, language-tagged message table
//! - `loader`: language-file sources, the parser seam, and the JSON format
//! - `validator`: checks applied to a language file before it is accepted
//! - `tenants`: per-tenant language sets and default languages
//! - `users`: per-tenant user language selections
//! - `registry`: the facade that ties the above together and resolves keys
//! - `metrics`: counters describing how resolutions were satisfied
//!
//! # Example
//!
//! ```rust
//! use language_registry::{LanguageFileSource, LanguageRegistry, UserId};
//!
//! let registry = LanguageRegistry::new();
//! let shop = registry
//!     .register_tenant(
//!         "shop",
//!         &LanguageFileSource::from_bytes(r#"{"language": "en", "messages": {"greeting": "Hello"}}"#),
//!     )
//!     .unwrap();
//! shop.register_language(&LanguageFileSource::from_bytes(
//!     r#"{"language": "de", "messages": {"greeting": "Hallo"}}"#,
//! ))
//! .unwrap();
//!
//! let user = UserId::random();
//! assert_eq!(shop.translation(user, "greeting").as_deref(), Some("Hello"));
//!
//! shop.set_user_language(user, "de").unwrap();
//! assert_eq!(shop.translation(user, "greeting").as_deref(), Some("Hallo"));
//! ```

mod language;
mod language_set;
mod loader;
mod metrics;
mod registry;
mod tenants;
mod users;
mod validator;

pub use language::{LanguageId, TenantId, UserId};
pub use language_set::LanguageSet;
pub use loader::{load_language_dir, JsonLanguageFileParser, LanguageFileParser, LanguageFileSource};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use registry::{LanguageRegistry, TenantLanguages};
pub use tenants::TenantRegistry;
pub use users::UserLanguageDirectory;
pub use validator::{LanguageFileValidator, ValidationReport};

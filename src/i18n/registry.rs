//! Language registry: the coordination point tenants talk to.
//!
//! Composes [`TenantRegistry`] and [`UserLanguageDirectory`] and implements
//! resolution with fallback. A registry is an ordinary value: construct one,
//! share it (by reference or `Arc`), and pass it to whoever needs it. Hosts
//! that want a single process-wide instance can use [`LanguageRegistry::global`].

use crate::error::{RegistryError, RegistryResult};
use crate::i18n::loader::{JsonLanguageFileParser, LanguageFileParser, LanguageFileSource};
use crate::i18n::metrics::ResolutionMetrics;
use crate::i18n::tenants::TenantRegistry;
use crate::i18n::users::UserLanguageDirectory;
use crate::i18n::{LanguageId, LanguageSet, TenantId, UserId};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Multi-tenant registry of language sets and user language selections.
pub struct LanguageRegistry {
    tenants: TenantRegistry,
    users: UserLanguageDirectory,
    parser: Box<dyn LanguageFileParser>,
    metrics: ResolutionMetrics,
}

/// Shared instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// An empty registry reading the default JSON language-file format.
    pub fn new() -> Self {
        Self::with_parser(JsonLanguageFileParser)
    }

    /// An empty registry using a custom language-file parser.
    pub fn with_parser(parser: impl LanguageFileParser + 'static) -> Self {
        Self {
            tenants: TenantRegistry::new(),
            users: UserLanguageDirectory::new(),
            parser: Box::new(parser),
            metrics: ResolutionMetrics::new(),
        }
    }

    /// Get the process-wide registry instance.
    ///
    /// Initialized with the JSON parser on first call.
    pub fn global() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(LanguageRegistry::new)
    }

    // ==================== Registration ====================

    /// Register a tenant with its default language file.
    ///
    /// The file is parsed before anything is stored; on
    /// [`RegistryError::InvalidLanguageFile`] the registry is unchanged.
    /// Registering the same tenant twice fails with
    /// [`RegistryError::DuplicateTenant`] and leaves the first registration
    /// intact.
    pub fn register_tenant(
        &self,
        tenant: impl Into<TenantId>,
        source: &LanguageFileSource,
    ) -> RegistryResult<TenantLanguages<'_>> {
        let default_set = self.parser.parse(source)?;
        self.register_tenant_set(tenant, default_set)
    }

    /// Register a tenant with an already-built default set.
    pub fn register_tenant_set(
        &self,
        tenant: impl Into<TenantId>,
        default_set: LanguageSet,
    ) -> RegistryResult<TenantLanguages<'_>> {
        let tenant = tenant.into();
        let language = default_set.language().clone();
        let messages = default_set.len();

        self.tenants.register_tenant(tenant.clone(), default_set)?;
        info!(
            "Registered tenant '{}' with default language '{}' ({} messages)",
            tenant, language, messages
        );

        Ok(self.tenant(tenant))
    }

    /// Add a language file for a registered tenant.
    ///
    /// A file for a language the tenant already has replaces it entirely.
    /// The tenant's default language is never changed.
    pub fn register_language_set(
        &self,
        tenant: &TenantId,
        source: &LanguageFileSource,
    ) -> RegistryResult<()> {
        let set = self.parser.parse(source)?;
        self.add_language_set(tenant, set)
    }

    /// Add an already-built language set for a registered tenant.
    pub fn add_language_set(&self, tenant: &TenantId, set: LanguageSet) -> RegistryResult<()> {
        let language = set.language().clone();
        let messages = set.len();

        let replaced = self.tenants.register_language_set(tenant, set)?;
        if replaced {
            info!(
                "Replaced language '{}' for tenant '{}' ({} messages)",
                language, tenant, messages
            );
        } else {
            info!(
                "Registered language '{}' for tenant '{}' ({} messages)",
                language, tenant, messages
            );
        }
        Ok(())
    }

    // ==================== User selection ====================

    /// Record the language a user picked for this tenant.
    ///
    /// The language does not have to be registered for the tenant.
    pub fn set_user_language(
        &self,
        tenant: &TenantId,
        user: UserId,
        language: impl Into<LanguageId>,
    ) -> RegistryResult<()> {
        self.ensure_registered(tenant)?;
        let language = language.into();
        debug!(
            "User {} selected language '{}' for tenant '{}'",
            user, language, tenant
        );
        self.users.set_language(tenant.clone(), user, language);
        Ok(())
    }

    /// The user's explicit selection, if any.
    pub fn user_language(&self, tenant: &TenantId, user: UserId) -> RegistryResult<Option<LanguageId>> {
        self.ensure_registered(tenant)?;
        Ok(self.users.get_language(tenant, &user))
    }

    /// Drop the user's selection and return it.
    pub fn clear_user_language(
        &self,
        tenant: &TenantId,
        user: UserId,
    ) -> RegistryResult<Option<LanguageId>> {
        self.ensure_registered(tenant)?;
        Ok(self.users.clear_language(tenant, &user))
    }

    /// The language resolution starts from: the user's selection, or the
    /// tenant default when there is none.
    pub fn effective_language(&self, tenant: &TenantId, user: UserId) -> RegistryResult<LanguageId> {
        let default = self.tenants.default_of(tenant)?;
        Ok(self.users.get_language(tenant, &user).unwrap_or(default))
    }

    // ==================== Resolution ====================

    /// Resolve `key` for `user`.
    ///
    /// Looks in the user's effective language first, then in the tenant's
    /// default language. Returns `None` when neither has the key, and also
    /// when the tenant is not registered (logged as a warning); a missing
    /// translation never fails the caller.
    pub fn resolve(&self, tenant: &TenantId, user: UserId, key: &str) -> Option<String> {
        match self.try_resolve(tenant, user, key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cannot resolve '{}': {}", key, e);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but reports an unregistered tenant as
    /// [`RegistryError::UnknownTenant`].
    pub fn try_resolve(
        &self,
        tenant: &TenantId,
        user: UserId,
        key: &str,
    ) -> RegistryResult<Option<String>> {
        let default = match self.tenants.default_of(tenant) {
            Ok(default) => default,
            Err(e) => {
                self.metrics.record_unknown_tenant();
                return Err(e);
            }
        };
        let effective = self
            .users
            .get_language(tenant, &user)
            .unwrap_or_else(|| default.clone());

        if let Some(value) = self.lookup_message(tenant, &effective, key) {
            self.metrics.record_selected_hit();
            return Ok(Some(value));
        }

        if effective != default {
            if let Some(value) = self.lookup_message(tenant, &default, key) {
                self.metrics.record_default_fallback();
                return Ok(Some(value));
            }
        }

        self.metrics.record_miss();
        Ok(None)
    }

    /// Resolve `key`, or return the key itself when nothing matches.
    pub fn resolve_or_key(&self, tenant: &TenantId, user: UserId, key: &str) -> String {
        self.resolve(tenant, user, key)
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup_message(&self, tenant: &TenantId, language: &LanguageId, key: &str) -> Option<String> {
        self.tenants
            .lookup(tenant, language)
            .and_then(|set| set.get(key).map(str::to_string))
    }

    // ==================== Queries ====================

    pub fn default_language(&self, tenant: &TenantId) -> RegistryResult<LanguageId> {
        self.tenants.default_of(tenant)
    }

    /// Languages registered for the tenant, sorted by code.
    pub fn languages(&self, tenant: &TenantId) -> RegistryResult<Vec<LanguageId>> {
        self.tenants.languages_of(tenant)
    }

    pub fn is_registered(&self, tenant: &TenantId) -> bool {
        self.tenants.contains(tenant)
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    /// A handle bound to one tenant.
    ///
    /// Creating the handle does not register anything; its operations fail
    /// with [`RegistryError::UnknownTenant`] until the tenant is registered.
    pub fn tenant(&self, tenant: impl Into<TenantId>) -> TenantLanguages<'_> {
        TenantLanguages {
            registry: self,
            tenant: tenant.into(),
        }
    }

    fn ensure_registered(&self, tenant: &TenantId) -> RegistryResult<()> {
        if self.tenants.contains(tenant) {
            Ok(())
        } else {
            Err(RegistryError::UnknownTenant(tenant.clone()))
        }
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The registry as seen by a single tenant.
///
/// Returned by [`LanguageRegistry::register_tenant`]; every call is scoped to
/// the bound tenant.
#[derive(Clone)]
pub struct TenantLanguages<'a> {
    registry: &'a LanguageRegistry,
    tenant: TenantId,
}

impl<'a> TenantLanguages<'a> {
    pub fn id(&self) -> &TenantId {
        &self.tenant
    }

    pub fn register_language(&self, source: &LanguageFileSource) -> RegistryResult<()> {
        self.registry.register_language_set(&self.tenant, source)
    }

    pub fn add_language_set(&self, set: LanguageSet) -> RegistryResult<()> {
        self.registry.add_language_set(&self.tenant, set)
    }

    pub fn set_user_language(&self, user: UserId, language: impl Into<LanguageId>) -> RegistryResult<()> {
        self.registry.set_user_language(&self.tenant, user, language)
    }

    pub fn user_language(&self, user: UserId) -> RegistryResult<Option<LanguageId>> {
        self.registry.user_language(&self.tenant, user)
    }

    pub fn default_language(&self) -> RegistryResult<LanguageId> {
        self.registry.default_language(&self.tenant)
    }

    /// The translation of `key` for `user`, or `None`.
    pub fn translation(&self, user: UserId, key: &str) -> Option<String> {
        self.registry.resolve(&self.tenant, user, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> LanguageSet {
        LanguageSet::from_pairs("en", [("greeting", "Hello"), ("only.default", "Default only")])
    }

    fn german() -> LanguageSet {
        LanguageSet::from_pairs("de", [("greeting", "Hallo")])
    }

    fn source(json: &str) -> LanguageFileSource {
        LanguageFileSource::from_bytes(json)
    }

    fn registry_with_shop() -> (LanguageRegistry, TenantId) {
        let registry = LanguageRegistry::new();
        let tenant = TenantId::new("shop");
        registry.register_tenant_set(tenant.clone(), english()).unwrap();
        (registry, tenant)
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_singleton() {
        let registry1 = LanguageRegistry::global();
        let registry2 = LanguageRegistry::global();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_new_registries_are_independent() {
        let a = LanguageRegistry::new();
        let b = LanguageRegistry::new();
        a.register_tenant_set("shop", english()).unwrap();

        assert!(a.is_registered(&TenantId::new("shop")));
        assert!(!b.is_registered(&TenantId::new("shop")));
    }

    // ==================== Registration Tests ====================

    #[test]
    fn test_register_tenant_from_source() {
        let registry = LanguageRegistry::new();
        let handle = registry
            .register_tenant(
                "shop",
                &source(r#"{"language": "en", "messages": {"greeting": "Hello"}}"#),
            )
            .expect("Should register");

        assert_eq!(handle.id(), &TenantId::new("shop"));
        assert_eq!(handle.default_language().unwrap(), LanguageId::new("en"));
        assert_eq!(registry.tenant_count(), 1);
    }

    #[test]
    fn test_register_tenant_invalid_file_changes_nothing() {
        let registry = LanguageRegistry::new();
        let result = registry.register_tenant("shop", &source(r#"{"language": "en"}"#));

        assert!(matches!(result, Err(RegistryError::InvalidLanguageFile { .. })));
        assert!(!registry.is_registered(&TenantId::new("shop")));
        assert_eq!(registry.tenant_count(), 0);
    }

    #[test]
    fn test_register_tenant_twice() {
        let (registry, tenant) = registry_with_shop();

        let result = registry.register_tenant_set(tenant.clone(), german());

        assert!(matches!(result, Err(RegistryError::DuplicateTenant(_))));
        assert_eq!(registry.default_language(&tenant).unwrap(), LanguageId::new("en"));
        assert_eq!(registry.languages(&tenant).unwrap(), vec![LanguageId::new("en")]);
    }

    #[test]
    fn test_register_language_set_invalid_file_keeps_existing() {
        let (registry, tenant) = registry_with_shop();
        registry.add_language_set(&tenant, german()).unwrap();

        let result = registry.register_language_set(
            &tenant,
            &source(r#"{"language": "de", "messages": {"greeting": 1}}"#),
        );

        assert!(matches!(result, Err(RegistryError::InvalidLanguageFile { .. })));
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();
        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_register_language_set_unknown_tenant() {
        let registry = LanguageRegistry::new();
        let result = registry.register_language_set(
            &TenantId::new("ghost"),
            &source(r#"{"language": "de", "messages": {"greeting": "Hallo"}}"#),
        );
        assert!(matches!(result, Err(RegistryError::UnknownTenant(_))));
    }

    #[test]
    fn test_invalid_file_for_unknown_tenant_reports_invalid_file() {
        let registry = LanguageRegistry::new();
        let result = registry.register_language_set(&TenantId::new("ghost"), &source("{"));
        assert!(matches!(result, Err(RegistryError::InvalidLanguageFile { .. })));
    }

    // ==================== User Selection Tests ====================

    #[test]
    fn test_set_user_language_unknown_tenant() {
        let registry = LanguageRegistry::new();
        let result = registry.set_user_language(&TenantId::new("ghost"), UserId::random(), "de");
        assert!(matches!(result, Err(RegistryError::UnknownTenant(_))));
    }

    #[test]
    fn test_effective_language() {
        let (registry, tenant) = registry_with_shop();
        let user = UserId::random();

        assert_eq!(registry.effective_language(&tenant, user).unwrap(), LanguageId::new("en"));
        registry.set_user_language(&tenant, user, "fr").unwrap();
        assert_eq!(registry.effective_language(&tenant, user).unwrap(), LanguageId::new("fr"));
    }

    #[test]
    fn test_clear_user_language_returns_to_default() {
        let (registry, tenant) = registry_with_shop();
        registry.add_language_set(&tenant, german()).unwrap();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();

        let cleared = registry.clear_user_language(&tenant, user).unwrap();

        assert_eq!(cleared, Some(LanguageId::new("de")));
        assert_eq!(registry.user_language(&tenant, user).unwrap(), None);
        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Hello"));
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_resolve_scenario() {
        let registry = LanguageRegistry::new();
        let tenant = TenantId::new("P");
        let u1 = UserId::random();
        let u2 = UserId::random();

        registry
            .register_tenant(
                tenant.clone(),
                &source(r#"{"language": "en", "messages": {"greeting": "Hello"}}"#),
            )
            .unwrap();
        assert_eq!(registry.resolve(&tenant, u1, "greeting").as_deref(), Some("Hello"));

        registry
            .register_language_set(
                &tenant,
                &source(r#"{"language": "de", "messages": {"greeting": "Hallo"}}"#),
            )
            .unwrap();
        registry.set_user_language(&tenant, u1, "de").unwrap();
        assert_eq!(registry.resolve(&tenant, u1, "greeting").as_deref(), Some("Hallo"));

        registry.set_user_language(&tenant, u2, "fr").unwrap();
        assert_eq!(registry.resolve(&tenant, u2, "greeting").as_deref(), Some("Hello"));

        assert_eq!(registry.resolve(&tenant, u1, "farewell"), None);
    }

    #[test]
    fn test_selected_language_wins_over_default() {
        let (registry, tenant) = registry_with_shop();
        registry.add_language_set(&tenant, german()).unwrap();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();

        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_missing_key_in_selected_falls_back_to_default() {
        let (registry, tenant) = registry_with_shop();
        registry.add_language_set(&tenant, german()).unwrap();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();

        assert_eq!(
            registry.resolve(&tenant, user, "only.default").as_deref(),
            Some("Default only")
        );
    }

    #[test]
    fn test_selection_registered_later_takes_effect() {
        let (registry, tenant) = registry_with_shop();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();
        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Hello"));

        registry.add_language_set(&tenant, german()).unwrap();

        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_hot_reload_replaces_entries() {
        let (registry, tenant) = registry_with_shop();
        registry
            .add_language_set(&tenant, LanguageSet::from_pairs("de", [("greeting", "Hallo"), ("bye", "Tschüss")]))
            .unwrap();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();

        registry
            .add_language_set(&tenant, LanguageSet::from_pairs("de", [("greeting", "Servus")]))
            .unwrap();

        assert_eq!(registry.resolve(&tenant, user, "greeting").as_deref(), Some("Servus"));
        // "bye" is gone from "de" and was never in "en"
        assert_eq!(registry.resolve(&tenant, user, "bye"), None);
    }

    #[test]
    fn test_resolve_unknown_tenant_is_absent() {
        let registry = LanguageRegistry::new();
        let tenant = TenantId::new("ghost");

        assert_eq!(registry.resolve(&tenant, UserId::random(), "greeting"), None);
        assert!(matches!(
            registry.try_resolve(&tenant, UserId::random(), "greeting"),
            Err(RegistryError::UnknownTenant(_))
        ));
    }

    #[test]
    fn test_resolve_or_key() {
        let (registry, tenant) = registry_with_shop();
        let user = UserId::random();

        assert_eq!(registry.resolve_or_key(&tenant, user, "greeting"), "Hello");
        assert_eq!(registry.resolve_or_key(&tenant, user, "menu.title"), "menu.title");
    }

    #[test]
    fn test_selections_are_isolated_between_tenants() {
        let registry = LanguageRegistry::new();
        let a = TenantId::new("a");
        let b = TenantId::new("b");
        registry.register_tenant_set(a.clone(), english()).unwrap();
        registry.register_tenant_set(b.clone(), english()).unwrap();
        registry.add_language_set(&a, german()).unwrap();
        registry.add_language_set(&b, german()).unwrap();
        let user = UserId::random();

        registry.set_user_language(&a, user, "de").unwrap();

        assert_eq!(registry.resolve(&a, user, "greeting").as_deref(), Some("Hallo"));
        assert_eq!(registry.resolve(&b, user, "greeting").as_deref(), Some("Hello"));
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_resolution_metrics() {
        let (registry, tenant) = registry_with_shop();
        registry.add_language_set(&tenant, german()).unwrap();
        let user = UserId::random();
        registry.set_user_language(&tenant, user, "de").unwrap();

        registry.resolve(&tenant, user, "greeting");
        registry.resolve(&tenant, user, "only.default");
        registry.resolve(&tenant, user, "missing");
        registry.resolve(&TenantId::new("ghost"), user, "greeting");

        let metrics = registry.metrics();
        assert_eq!(metrics.selected_hits(), 1);
        assert_eq!(metrics.default_fallbacks(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.unknown_tenants(), 1);
    }

    // ==================== Tenant Handle Tests ====================

    #[test]
    fn test_tenant_handle_operations() {
        let registry = LanguageRegistry::new();
        let handle = registry
            .register_tenant(
                "shop",
                &source(r#"{"language": "en", "messages": {"greeting": "Hello"}}"#),
            )
            .unwrap();
        handle
            .register_language(&source(r#"{"language": "de", "messages": {"greeting": "Hallo"}}"#))
            .unwrap();
        let user = UserId::random();

        assert_eq!(handle.translation(user, "greeting").as_deref(), Some("Hello"));
        handle.set_user_language(user, "de").unwrap();
        assert_eq!(handle.user_language(user).unwrap(), Some(LanguageId::new("de")));
        assert_eq!(handle.translation(user, "greeting").as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_unregistered_tenant_handle() {
        let registry = LanguageRegistry::new();
        let handle = registry.tenant("ghost");

        assert!(matches!(handle.add_language_set(german()), Err(RegistryError::UnknownTenant(_))));
        assert_eq!(handle.translation(UserId::random(), "greeting"), None);
    }
}

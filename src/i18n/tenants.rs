//! Per-tenant language sets and default languages.

use crate::error::{RegistryError, RegistryResult};
use crate::i18n::{LanguageId, LanguageSet, TenantId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Language sets registered by one tenant.
///
/// `default` is fixed at registration and is always a key of `sets`.
#[derive(Debug)]
struct TenantRecord {
    default: LanguageId,
    sets: RwLock<HashMap<LanguageId, Arc<LanguageSet>>>,
}

impl TenantRecord {
    fn new(default_set: LanguageSet) -> Self {
        let default = default_set.language().clone();
        let mut sets = HashMap::new();
        sets.insert(default.clone(), Arc::new(default_set));
        Self {
            default,
            sets: RwLock::new(sets),
        }
    }
}

/// Owns every tenant's record.
///
/// The top-level map is sharded, so unrelated tenants rarely share a lock,
/// and a record is cloned out as an `Arc` before its own lock is taken.
#[derive(Debug, Default)]
pub struct TenantRegistry {
    tenants: DashMap<TenantId, Arc<TenantRecord>>,
}

impl TenantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, tenant: &TenantId) -> RegistryResult<Arc<TenantRecord>> {
        self.tenants
            .get(tenant)
            .map(|record| Arc::clone(record.value()))
            .ok_or_else(|| RegistryError::UnknownTenant(tenant.clone()))
    }

    /// Create the tenant's record with `default_set` as its only set.
    ///
    /// The existence check and the insert happen under one shard lock, so two
    /// racing registrations can't both succeed.
    pub fn register_tenant(&self, tenant: TenantId, default_set: LanguageSet) -> RegistryResult<()> {
        match self.tenants.entry(tenant) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateTenant(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(TenantRecord::new(default_set)));
                Ok(())
            }
        }
    }

    /// Add `set`, replacing any set with the same language.
    ///
    /// Returns `true` when an existing set was replaced. The default language
    /// never changes.
    pub fn register_language_set(&self, tenant: &TenantId, set: LanguageSet) -> RegistryResult<bool> {
        let record = self.record(tenant)?;
        let language = set.language().clone();
        let replaced = record.sets.write().insert(language, Arc::new(set)).is_some();
        Ok(replaced)
    }

    pub fn lookup(&self, tenant: &TenantId, language: &LanguageId) -> Option<Arc<LanguageSet>> {
        let record = self.record(tenant).ok()?;
        let sets = record.sets.read();
        sets.get(language).cloned()
    }

    pub fn default_of(&self, tenant: &TenantId) -> RegistryResult<LanguageId> {
        Ok(self.record(tenant)?.default.clone())
    }

    /// Registered languages for the tenant, sorted by code.
    pub fn languages_of(&self, tenant: &TenantId) -> RegistryResult<Vec<LanguageId>> {
        let record = self.record(tenant)?;
        let mut languages: Vec<_> = record.sets.read().keys().cloned().collect();
        languages.sort();
        Ok(languages)
    }

    pub fn contains(&self, tenant: &TenantId) -> bool {
        self.tenants.contains_key(tenant)
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

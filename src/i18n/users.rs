//! Per-tenant user language selections.

use crate::i18n::{LanguageId, TenantId, UserId};
use dashmap::DashMap;

/// Maps (tenant, user) to the language the user picked.
///
/// Selections are not checked against the tenant's registered languages; a
/// tenant may register the matching set later, and until then resolution
/// falls back to the default.
#[derive(Debug, Default)]
pub struct UserLanguageDirectory {
    selections: DashMap<(TenantId, UserId), LanguageId>,
}

impl UserLanguageDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's choice and return the one it replaced.
    pub fn set_language(
        &self,
        tenant: TenantId,
        user: UserId,
        language: LanguageId,
    ) -> Option<LanguageId> {
        self.selections.insert((tenant, user), language)
    }

    pub fn get_language(&self, tenant: &TenantId, user: &UserId) -> Option<LanguageId> {
        self.selections
            .get(&(tenant.clone(), *user))
            .map(|language| language.value().clone())
    }

    /// Forget the user's choice so they see the tenant default again.
    pub fn clear_language(&self, tenant: &TenantId, user: &UserId) -> Option<LanguageId> {
        self.selections
            .remove(&(tenant.clone(), *user))
            .map(|(_, language)| language)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

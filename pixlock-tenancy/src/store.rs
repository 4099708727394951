//! Shared handle around the selection state.

use crate::selection::{Tenant, TenantSelection};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Clonable handle to the one piece of shared mutable state in the core.
///
/// All mutation goes through the derivation/select/clear paths below;
/// reads snapshot the whole value.
#[derive(Clone, Default)]
pub struct TenantStore {
    inner: Arc<RwLock<TenantSelection>>,
}

impl TenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> TenantSelection {
        self.inner.read().await.clone()
    }

    pub async fn selected(&self) -> Option<Tenant> {
        self.inner.read().await.selected().cloned()
    }

    pub async fn needs_selection(&self, tenant_count: usize) -> bool {
        self.inner.read().await.needs_selection(tenant_count)
    }

    /// Re-runs selection derivation against a fresh token/tenant list.
    pub async fn sync(&self, session_token: &str, tenants: &[Tenant]) {
        self.inner.write().await.sync(session_token, tenants);
    }

    /// Records an explicit user choice.
    pub async fn select(&self, tenant: Tenant) {
        self.inner.write().await.select(tenant);
    }

    /// Clears the selection, e.g. on logout.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

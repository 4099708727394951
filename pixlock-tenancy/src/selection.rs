//! Tenant selection derivation.

use pixlock_auth::decode_session_claims;
use serde::{Deserialize, Serialize};

/// A tenant the user belongs to, as carried in the session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_names: Option<Vec<String>>,
}

impl Tenant {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_name: None,
            role_names: None,
        }
    }
}

/// Active-tenant selection state.
///
/// One writer path (`sync` / `select` / `clear`); updates replace the whole
/// value, so concurrent readers always observe a consistent selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TenantSelection {
    selected: Option<Tenant>,
    initialized: bool,
}

impl TenantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Tenant> {
        self.selected.as_ref()
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// True when the caller must obtain an explicit tenant choice before
    /// proceeding: derivation ran, several tenants exist, none selected.
    pub fn needs_selection(&self, tenant_count: usize) -> bool {
        self.initialized && tenant_count > 1 && self.selected.is_none()
    }

    /// Explicit user choice.
    pub fn select(&mut self, tenant: Tenant) {
        self.selected = Some(tenant);
    }

    /// Drops all selection state, e.g. on logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Re-derives the selection from a session token and the user's known
    /// tenants. Run whenever either changes. First match wins:
    ///
    /// 1. The token's active-tenant claim, when it names a known tenant,
    ///    but only when it differs from the current selection, so a stale
    ///    claim on a routine token refresh never clobbers an explicit
    ///    choice.
    /// 2. Auto-select when exactly one tenant is known and none is
    ///    selected.
    /// 3. Otherwise leave the selection empty; `needs_selection` reports
    ///    whether the caller must ask the user.
    pub fn sync(&mut self, session_token: &str, tenants: &[Tenant]) {
        if !tenants.is_empty() {
            let claim = decode_session_claims(session_token).and_then(|c| c.dct);
            if let Some(claim) = claim {
                let differs = self
                    .selected
                    .as_ref()
                    .map(|t| t.tenant_id != claim)
                    .unwrap_or(true);
                if differs {
                    if let Some(tenant) = tenants.iter().find(|t| t.tenant_id == claim) {
                        self.selected = Some(tenant.clone());
                    }
                }
            }
            self.initialized = true;
        }

        if self.initialized && self.selected.is_none() && tenants.len() == 1 {
            self.selected = Some(tenants[0].clone());
        }
    }
}

//! Active-tenant selection for multi-tenant sessions.
//!
//! A user belongs to zero, one, or many tenants (carried in their session
//! token); exactly one is active at a time and decides which tenant-scoped
//! grants apply. Selection derives from the token's active-tenant claim,
//! falls back to auto-selecting a sole tenant, and otherwise waits for an
//! explicit user choice.

pub mod selection;
pub mod store;

pub use selection::{Tenant, TenantSelection};
pub use store::TenantStore;

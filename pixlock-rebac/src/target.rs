//! Viewer-target wire codec.
//!
//! The one place that knows how identities are spelled on the wire. Two
//! formats coexist: plain `user:<id>` (owner grants) and tenant-scoped
//! `user:<id>#tenant:<id>` (viewer grants). Pure functions, no I/O.

/// Plain user target, used exclusively for owner relations.
pub fn user_target(user_id: &str) -> String {
    format!("user:{user_id}")
}

/// Image resource string.
pub fn image_resource(image_id: &str) -> String {
    format!("image:{image_id}")
}

/// Extracts the image id from an `image:` resource, or `None` for any
/// other resource kind.
pub fn image_id_of(resource: &str) -> Option<&str> {
    resource.strip_prefix("image:")
}

/// Tenant-scoped viewer target: `user:<userId>#tenant:<tenantId>`.
///
/// No escaping is applied; ids containing the literal `:` or `#` separators
/// violate the input contract and are not handled defensively.
pub fn viewer_target(user_id: &str, tenant_id: &str) -> String {
    format!("user:{user_id}#tenant:{tenant_id}")
}

/// A parsed tenant-scoped viewer target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerTarget {
    pub user_id: String,
    pub tenant_id: String,
}

/// Parses exactly the two-part scoped format.
///
/// Returns `None` for any other shape, including the legacy plain-user
/// format. That `None` is a signal, not an error: callers use it to detect
/// and exclude legacy viewer tuples, which are treated as already revoked.
pub fn parse_viewer_target(target: &str) -> Option<ViewerTarget> {
    let rest = target.strip_prefix("user:")?;
    let (user_id, scoped) = rest.split_once('#')?;
    let tenant_id = scoped.strip_prefix("tenant:")?;
    if user_id.is_empty() || tenant_id.is_empty() {
        return None;
    }
    Some(ViewerTarget {
        user_id: user_id.to_string(),
        tenant_id: tenant_id.to_string(),
    })
}

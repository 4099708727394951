//! Relation tuple model.

use crate::target::{image_resource, user_target, viewer_target};
use serde::{Deserialize, Serialize};

/// The only namespace this application writes today. The field stays an
/// open string so tuples from other namespaces pass through deserialization
/// and are ignored, never errored on.
pub const RELATION_NAMESPACE: &str = "metadata_item";

/// Relation kind within a tuple.
///
/// Unknown relation definitions decode to `Other` and are skipped during
/// resolution, keeping the model open to backend extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationDef {
    Owner,
    Viewer,
    #[serde(other)]
    Other,
}

/// The atomic access-control fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationTuple {
    pub namespace: String,
    #[serde(rename = "relationDefinition")]
    pub relation: RelationDef,
    /// `"<kind>:<resourceId>"`, e.g. `"image:<uuid>"`.
    pub resource: String,
    /// Identity the relation is granted to. Owners use the plain
    /// `user:<id>` form; viewers use the tenant-scoped form.
    pub target: String,
}

impl RelationTuple {
    /// Ownership tuple for an image. Owner targets are never tenant-scoped;
    /// owners see their images in every tenant context.
    pub fn image_owner(image_id: &str, user_id: &str) -> Self {
        Self {
            namespace: RELATION_NAMESPACE.to_string(),
            relation: RelationDef::Owner,
            resource: image_resource(image_id),
            target: user_target(user_id),
        }
    }

    /// Tenant-scoped viewer tuple for an image. This is the only viewer
    /// form the application ever writes.
    pub fn image_viewer(image_id: &str, user_id: &str, tenant_id: &str) -> Self {
        Self {
            namespace: RELATION_NAMESPACE.to_string(),
            relation: RelationDef::Viewer,
            resource: image_resource(image_id),
            target: viewer_target(user_id, tenant_id),
        }
    }
}

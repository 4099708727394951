//! Access resolution engine.
//!
//! Turns a flat relation tuple list into "what can user U see while
//! operating in tenant T", and resolves the owning user per image. The
//! classification rule:
//!
//! - owner relations are always in, regardless of tenant;
//! - viewer relations are in only when their target parses as
//!   tenant-scoped and the tenant matches;
//! - legacy (unscoped) viewer targets are dropped as if already revoked;
//! - everything outside `metadata_item` / `image:` is ignored.

use crate::client::RelationStoreClient;
use crate::target::{image_id_of, image_resource, parse_viewer_target};
use crate::types::{RELATION_NAMESPACE, RelationDef, RelationTuple};
use futures::future::join_all;
use std::collections::HashMap;
use tracing::warn;

/// How the user reaches an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Via an owner tuple; visible in every tenant.
    Owner,
    /// Via a viewer tuple scoped to the active tenant.
    TenantViewer,
}

/// One visible image with the relation that surfaced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAccess {
    pub image_id: String,
    pub kind: AccessKind,
}

/// Computes the visible image set for the active tenant.
///
/// Deduplicates by image id; when the same image is reachable through both
/// an owner and a viewer tuple, owner wins for display purposes (both grant
/// visibility either way). First-seen order is preserved.
pub fn visible_images(relations: &[RelationTuple], tenant_id: &str) -> Vec<ImageAccess> {
    let mut visible: Vec<ImageAccess> = Vec::new();

    for rel in relations {
        if rel.namespace != RELATION_NAMESPACE {
            continue;
        }
        let Some(image_id) = image_id_of(&rel.resource) else {
            continue;
        };

        let kind = match rel.relation {
            RelationDef::Owner => AccessKind::Owner,
            RelationDef::Viewer => match parse_viewer_target(&rel.target) {
                // Legacy or foreign-tenant grants never surface.
                Some(scoped) if scoped.tenant_id == tenant_id => AccessKind::TenantViewer,
                _ => continue,
            },
            RelationDef::Other => continue,
        };

        match visible.iter_mut().find(|a| a.image_id == image_id) {
            Some(existing) => {
                if kind == AccessKind::Owner {
                    existing.kind = AccessKind::Owner;
                }
            }
            None => visible.push(ImageAccess {
                image_id: image_id.to_string(),
                kind,
            }),
        }
    }

    visible
}

/// Resolves the owning user for each visible image.
///
/// Images reached via an owner tuple belong to the caller. Images reached
/// via a viewer tuple need a per-image resource lookup, a known extra
/// round trip, fanned out concurrently. A failed or ownerless lookup leaves
/// that image out of the map; the image stays visible with owner absent,
/// and the failure is logged rather than aborting the batch.
pub async fn resolve_owners(
    client: &RelationStoreClient,
    user_id: &str,
    access: &[ImageAccess],
) -> HashMap<String, String> {
    let lookups = access.iter().map(|entry| async move {
        match entry.kind {
            AccessKind::Owner => Some((entry.image_id.clone(), user_id.to_string())),
            AccessKind::TenantViewer => {
                match client.resource_relations(&image_resource(&entry.image_id)).await {
                    Ok(relations) => relations
                        .iter()
                        .find(|rel| rel.relation == RelationDef::Owner)
                        .and_then(|rel| rel.target.strip_prefix("user:"))
                        .map(|owner| (entry.image_id.clone(), owner.to_string())),
                    Err(err) => {
                        warn!(image_id = %entry.image_id, error = %err, "owner lookup failed");
                        None
                    }
                }
            }
        }
    });

    join_all(lookups).await.into_iter().flatten().collect()
}

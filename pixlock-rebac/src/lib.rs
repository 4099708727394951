//! Relationship-based access control for Pixlock.
//!
//! Permissions are facts, not roles: a relation tuple
//! `(namespace, relation, resource, target)` says "this target is
//! owner/viewer of this resource". This crate owns:
//! - the tuple model and the viewer-target wire codec,
//! - the relation store client (queries and mutations over GraphQL),
//! - the access resolution engine that turns a flat tuple list into
//!   "what can this user see in this tenant".
//!
//! Owner grants use a plain `user:<id>` target and apply in every tenant.
//! Viewer grants use a tenant-scoped `user:<id>#tenant:<id>` target and
//! apply only inside that tenant. Viewer tuples in the old unscoped format
//! are excluded from resolution entirely; existing shares from before
//! tenant scoping silently stop granting access.

pub mod client;
pub mod config;
pub mod resolve;
pub mod target;
pub mod types;

pub use client::RelationStoreClient;
pub use config::RebacConfig;
pub use pixlock_graphql::{ClientError, ClientResult};
pub use resolve::{AccessKind, ImageAccess, resolve_owners, visible_images};
pub use target::{ViewerTarget, parse_viewer_target, viewer_target};
pub use types::{RELATION_NAMESPACE, RelationDef, RelationTuple};

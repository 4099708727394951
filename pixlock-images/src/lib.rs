//! Image gallery core.
//!
//! Coordinates the relation store, the directory services, and the
//! presigned-URL API into the user-facing image operations: upload with
//! ownership recording, tenant-scoped gallery listing with best-effort
//! enrichment, and the share/unshare workflows.

pub mod config;
pub mod error;
pub mod presign;
pub mod service;
pub mod sharing;
pub mod types;

pub use config::ImageApiConfig;
pub use error::{EnrichmentError, ImageError, ImageResult};
pub use presign::PresignClient;
pub use service::ImageService;
pub use sharing::{ShareGrant, ShareManager, ShareStep, ShareWizard};
pub use types::*;

//! Image operation errors.

use pixlock_graphql::ClientError;
use thiserror::Error;

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors that can occur in image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Failure from one of the GraphQL backends (relation store or a
    /// directory service), already classified at the transport boundary.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The presigned-URL API rejected the request; carries its message.
    #[error("presign request failed: {0}")]
    Presign(String),

    /// The object store rejected the upload itself.
    #[error("upload failed: {0}")]
    Upload(String),

    /// Client-side rejection before any request is made.
    #[error("invalid upload: {0}")]
    Validation(String),

    /// A sharing workflow was driven out of order.
    #[error("share workflow error: {0}")]
    Workflow(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A per-image enrichment failure inside a listing.
///
/// The affected image is dropped from the result set while the listing as
/// a whole still succeeds; one broken image must not blank the gallery.
#[derive(Debug, Error)]
#[error("enrichment failed for image {image_id}: {error}")]
pub struct EnrichmentError {
    pub image_id: String,
    #[source]
    pub error: ImageError,
}

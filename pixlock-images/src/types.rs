//! Image and sharing wire types.

use crate::error::ImageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MIME types the signing API accepts.
pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Maximum upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum filename length accepted by the signing API.
pub const MAX_FILENAME_LEN: usize = 255;

/// Client-side pre-flight for uploads. The signing API enforces the same
/// contract server-side; this just avoids a doomed round trip.
pub fn validate_upload(filename: &str, content_type: &str, size_bytes: u64) -> Result<(), ImageError> {
    if filename.is_empty() {
        return Err(ImageError::Validation("filename must not be empty".into()));
    }
    if filename.len() > MAX_FILENAME_LEN {
        return Err(ImageError::Validation(format!(
            "filename exceeds {MAX_FILENAME_LEN} characters"
        )));
    }
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ImageError::Validation(format!(
            "unsupported content type {content_type}"
        )));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ImageError::Validation(format!(
            "file exceeds {MAX_UPLOAD_BYTES} bytes"
        )));
    }
    Ok(())
}

/// An image as presented to the gallery.
///
/// Derived, not persisted here: an image exists the moment an owner
/// relation for it does. Content type and upload time are placeholders
/// until a metadata API exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_id: String,
    pub s3_key: String,
    pub filename: String,
    pub content_type: String,
    /// Resolved owner. Absent when the owner tuple was retracted or its
    /// lookup failed; the image stays visible regardless.
    pub owner_user_id: Option<String>,
    /// Whether the listing user owns this image. Drives share affordances
    /// only; visibility was already decided by relation classification.
    pub owned: bool,
    pub uploaded_at: DateTime<Utc>,
    /// Short-lived presigned download URL.
    pub download_url: Option<String>,
}

/// Gallery listing with the count of images dropped by enrichment
/// failures. Callers may surface the count or ignore it; dropping
/// silently is the default policy.
#[derive(Clone, Debug, Default)]
pub struct Listing {
    pub images: Vec<Image>,
    pub dropped: usize,
}

/// Request body for presigned upload URL generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub user_id: String,
    pub filename: String,
    pub content_type: String,
}

/// Response from presigned upload URL generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrl {
    pub upload_url: String,
    pub image_id: String,
    pub s3_key: String,
    pub expires_in: u64,
}

/// Response from presigned download URL generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrl {
    pub download_url: String,
    pub s3_key: String,
    pub expires_in: u64,
}

/// Receipt for a completed upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    pub image_id: String,
    pub s3_key: String,
}

/// A user holding viewer access to an image, enriched from the member
/// directory for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedUser {
    pub user_id: String,
    /// Falls back to the bare user id when directory lookup fails.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

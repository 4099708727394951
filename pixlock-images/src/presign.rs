//! Presigned-URL API client.
//!
//! A thin REST client over the stateless signing service plus the raw PUT
//! to object storage. This boundary is unauthenticated from our side; the
//! signing service enforces its own validation contract (identity pattern,
//! filename length, MIME allow-list, UUID image ids).

use crate::config::ImageApiConfig;
use crate::error::{ImageError, ImageResult};
use crate::types::{DownloadUrl, UploadRequest, UploadUrl};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Client for the presigned-URL API and the object store it signs for.
pub struct PresignClient {
    http: reqwest::Client,
    base_url: String,
}

impl PresignClient {
    pub fn new(config: ImageApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: config.api_base_url,
        }
    }

    async fn error_message(resp: reqwest::Response, fallback: &str) -> String {
        resp.json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Requests a presigned upload URL for a new image.
    pub async fn upload_url(&self, request: &UploadRequest) -> ImageResult<UploadUrl> {
        debug!(filename = %request.filename, "requesting upload URL");
        let resp = self
            .http
            .post(format!("{}/upload-url", self.base_url))
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let message = Self::error_message(resp, "failed to generate upload URL").await;
            return Err(ImageError::Presign(message));
        }
        Ok(resp.json().await?)
    }

    /// Requests a presigned download URL for an existing image.
    pub async fn download_url(&self, image_id: &str, user_id: &str) -> ImageResult<DownloadUrl> {
        let resp = self
            .http
            .get(format!("{}/download-url", self.base_url))
            .query(&[("imageId", image_id), ("userId", user_id)])
            .send()
            .await?;

        if !resp.status().is_success() {
            let message = Self::error_message(resp, "failed to generate download URL").await;
            return Err(ImageError::Presign(message));
        }
        Ok(resp.json().await?)
    }

    /// Uploads the image bytes to object storage via a presigned URL.
    pub async fn put_object(
        &self,
        presigned_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ImageResult<()> {
        let resp = self
            .http
            .put(presigned_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ImageError::Upload(format!(
                "object store rejected upload: {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

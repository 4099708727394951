//! Image service: uploads and tenant-scoped gallery listing.

use crate::error::{EnrichmentError, ImageResult};
use crate::presign::PresignClient;
use crate::types::{Image, Listing, SharedUser, UploadReceipt, UploadRequest, validate_upload};
use chrono::Utc;
use futures::future::join_all;
use pixlock_directory::MemberServiceClient;
use pixlock_rebac::{AccessKind, RelationStoreClient, resolve_owners, visible_images};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Coordinates the relation store, the member directory, and the signing
/// API into the gallery operations.
pub struct ImageService {
    presign: PresignClient,
    relations: Arc<RelationStoreClient>,
    members: Arc<MemberServiceClient>,
}

impl ImageService {
    pub fn new(
        presign: PresignClient,
        relations: Arc<RelationStoreClient>,
        members: Arc<MemberServiceClient>,
    ) -> Self {
        Self {
            presign,
            relations,
            members,
        }
    }

    /// Full upload workflow: presign, PUT to object storage, record
    /// ownership. The image exists, access-control wise, once the final
    /// step lands.
    pub async fn complete_upload(
        &self,
        user_id: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ImageResult<UploadReceipt> {
        validate_upload(filename, content_type, bytes.len() as u64)?;

        let granted = self
            .presign
            .upload_url(&UploadRequest {
                user_id: user_id.to_string(),
                filename: filename.to_string(),
                content_type: content_type.to_string(),
            })
            .await?;

        self.presign
            .put_object(&granted.upload_url, content_type, bytes)
            .await?;

        self.relations
            .create_image_ownership(&granted.image_id, user_id)
            .await?;

        info!(image_id = %granted.image_id, "image uploaded");
        Ok(UploadReceipt {
            image_id: granted.image_id,
            s3_key: granted.s3_key,
        })
    }

    /// Lists every image the user can see in the active tenant.
    ///
    /// Relation fetch and classification decide visibility; owner
    /// resolution and download-URL generation are enrichment. Enrichment
    /// failures are isolated per image: the failed image is dropped and
    /// counted, the rest of the listing goes through.
    pub async fn list_visible(&self, user_id: &str, tenant_id: &str) -> ImageResult<Listing> {
        let relations = self
            .relations
            .target_access_with_tenant(user_id, tenant_id)
            .await?;
        let access = visible_images(&relations, tenant_id);
        debug!(count = access.len(), "resolved visible image set");

        let owners = resolve_owners(&self.relations, user_id, &access).await;

        let enriched = join_all(access.iter().map(|entry| {
            let owners = &owners;
            async move {
                match self.presign.download_url(&entry.image_id, user_id).await {
                    Ok(url) => {
                        let filename = url
                            .s3_key
                            .rsplit('/')
                            .next()
                            .unwrap_or(entry.image_id.as_str())
                            .to_string();
                        Ok(Image {
                            image_id: entry.image_id.clone(),
                            s3_key: url.s3_key,
                            filename,
                            // No metadata API yet; actual type and upload
                            // time are unknown at this layer.
                            content_type: "image/jpeg".to_string(),
                            owner_user_id: owners.get(&entry.image_id).cloned(),
                            owned: entry.kind == AccessKind::Owner,
                            uploaded_at: Utc::now(),
                            download_url: Some(url.download_url),
                        })
                    }
                    Err(error) => Err(EnrichmentError {
                        image_id: entry.image_id.clone(),
                        error,
                    }),
                }
            }
        }))
        .await;

        let mut listing = Listing::default();
        for item in enriched {
            match item {
                Ok(image) => listing.images.push(image),
                Err(err) => {
                    warn!(error = %err, "dropping image from listing");
                    listing.dropped += 1;
                }
            }
        }
        Ok(listing)
    }

    /// Users currently holding tenant-scoped viewer access to an image,
    /// enriched from the member directory. Directory failures degrade to
    /// the bare user id; they never block the result.
    pub async fn shared_users(&self, image_id: &str) -> ImageResult<Vec<SharedUser>> {
        let viewers = self.relations.image_viewers(image_id).await?;

        let users = join_all(viewers.iter().map(|viewer| async move {
            match self.members.get_user_by_id(&viewer.user_id).await {
                Ok(Some(info)) => SharedUser {
                    user_id: viewer.user_id.clone(),
                    email: info.email,
                    name: info.name,
                },
                Ok(None) => SharedUser {
                    user_id: viewer.user_id.clone(),
                    email: viewer.user_id.clone(),
                    name: None,
                },
                Err(err) => {
                    debug!(user_id = %viewer.user_id, error = %err, "viewer lookup failed");
                    SharedUser {
                        user_id: viewer.user_id.clone(),
                        email: viewer.user_id.clone(),
                        name: None,
                    }
                }
            }
        }))
        .await;

        Ok(users)
    }

    /// Whether the user owns the image. Drives affordances only.
    pub async fn is_owner(&self, image_id: &str, user_id: &str) -> ImageResult<bool> {
        Ok(self.relations.is_image_owner(image_id, user_id).await?)
    }
}

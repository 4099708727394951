use pixlock_auth::{SessionTokenStore, TokenProvider};
use pixlock_directory::{DirectoryConfig, MemberServiceClient};
use pixlock_images::{ImageApiConfig, ImageService, PresignClient};
use pixlock_rebac::{RebacConfig, RelationStoreClient};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, member_configured: bool) -> ImageService {
    let store = SessionTokenStore::new();
    store.set("jwt-test");
    let tokens: Arc<dyn TokenProvider> = Arc::new(store);

    let relations = Arc::new(RelationStoreClient::new(
        RebacConfig::new(format!("{}/relations", server.uri())),
        Arc::clone(&tokens),
    ));
    let members = Arc::new(MemberServiceClient::new(
        &DirectoryConfig {
            org_endpoint: None,
            member_endpoint: member_configured.then(|| format!("{}/member", server.uri())),
        },
        tokens,
    ));
    let presign = PresignClient::new(ImageApiConfig::new(format!("{}/images", server.uri())));
    ImageService::new(presign, relations, members)
}

fn relations_response(relations: serde_json::Value, field: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": { field: { "relations": relations } }
    }))
}

async fn mount_listing_relations(server: &MockServer) {
    // Plain target: the owned image plus a legacy unscoped viewer grant,
    // which must never surface in any tenant.
    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_partial_json(
            serde_json::json!({ "variables": { "targetId": "user:alice" } }),
        ))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "owner",
                    "resource": "image:own-1",
                    "target": "user:alice"
                },
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "viewer",
                    "resource": "image:legacy-1",
                    "target": "user:alice"
                }
            ]),
            "getTargetAccess",
        ))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_partial_json(
            serde_json::json!({ "variables": { "targetId": "user:alice#tenant:t1" } }),
        ))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "viewer",
                    "resource": "image:shared-1",
                    "target": "user:alice#tenant:t1"
                }
            ]),
            "getTargetAccess",
        ))
        .mount(server)
        .await;

    // Owner lookup for the shared image.
    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_partial_json(
            serde_json::json!({ "variables": { "resourceId": "image:shared-1" } }),
        ))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "owner",
                    "resource": "image:shared-1",
                    "target": "user:bob"
                }
            ]),
            "getResourceRelations",
        ))
        .mount(server)
        .await;
}

fn download_response(image_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "downloadUrl": format!("https://bucket.s3.test/{image_id}"),
        "s3Key": format!("users/someone/{image_id}.png"),
        "expiresIn": 300
    }))
}

#[tokio::test]
async fn listing_merges_owned_and_tenant_shared_images() {
    let server = MockServer::start().await;
    mount_listing_relations(&server).await;
    for id in ["own-1", "shared-1"] {
        Mock::given(method("GET"))
            .and(path("/images/download-url"))
            .and(query_param("imageId", id))
            .respond_with(download_response(id))
            .mount(&server)
            .await;
    }

    let listing = service(&server, false).list_visible("alice", "t1").await.unwrap();

    assert_eq!(listing.dropped, 0);
    assert_eq!(listing.images.len(), 2);

    let owned = &listing.images[0];
    assert_eq!(owned.image_id, "own-1");
    assert!(owned.owned);
    assert_eq!(owned.owner_user_id.as_deref(), Some("alice"));
    assert_eq!(owned.filename, "own-1.png");
    assert_eq!(owned.download_url.as_deref(), Some("https://bucket.s3.test/own-1"));

    let shared = &listing.images[1];
    assert_eq!(shared.image_id, "shared-1");
    assert!(!shared.owned);
    assert_eq!(shared.owner_user_id.as_deref(), Some("bob"));

    // The legacy unscoped grant never produced an image.
    assert!(listing.images.iter().all(|img| img.image_id != "legacy-1"));
}

#[tokio::test]
async fn failed_enrichment_drops_only_that_image() {
    let server = MockServer::start().await;
    mount_listing_relations(&server).await;
    Mock::given(method("GET"))
        .and(path("/images/download-url"))
        .and(query_param("imageId", "own-1"))
        .respond_with(download_response("own-1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/download-url"))
        .and(query_param("imageId", "shared-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let listing = service(&server, false).list_visible("alice", "t1").await.unwrap();

    assert_eq!(listing.images.len(), 1);
    assert_eq!(listing.images[0].image_id, "own-1");
    assert_eq!(listing.dropped, 1);
}

#[tokio::test]
async fn upload_signs_puts_and_records_ownership() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/upload-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": format!("{}/bucket/users/alice/img-9.png", server.uri()),
            "imageId": "img-9",
            "s3Key": "users/alice/img-9.png",
            "expiresIn": 300
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/users/alice/img-9.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // Ownership goes down as a plain user target with no tenant scope.
    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_string_contains("createRelations"))
        .and(body_partial_json(serde_json::json!({
            "variables": { "input": { "relations": [{
                "namespace": "metadata_item",
                "relationDefinition": "owner",
                "resource": "image:img-9",
                "target": "user:alice"
            }] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "createRelations": { "message": "created 1 relation" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = service(&server, false)
        .complete_upload("alice", "cat.png", "image/png", vec![0xFF; 64])
        .await
        .unwrap();
    assert_eq!(receipt.image_id, "img-9");
    assert_eq!(receipt.s3_key, "users/alice/img-9.png");
}

#[tokio::test]
async fn invalid_upload_fails_before_any_request() {
    let server = MockServer::start().await;

    let err = service(&server, false)
        .complete_upload("alice", "doc.pdf", "application/pdf", vec![1])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("application/pdf"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn shared_users_enriches_from_directory_and_skips_legacy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_partial_json(
            serde_json::json!({ "variables": { "resourceId": "image:img-1" } }),
        ))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "owner",
                    "resource": "image:img-1",
                    "target": "user:alice"
                },
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "viewer",
                    "resource": "image:img-1",
                    "target": "user:carol#tenant:t1"
                },
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "viewer",
                    "resource": "image:img-1",
                    "target": "user:dave"
                }
            ]),
            "getResourceRelations",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/member"))
        .and(body_partial_json(
            serde_json::json!({ "variables": { "userId": "carol" } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "getUserById": {
                "userId": "carol",
                "name": "Carol Reyes",
                "email": "carol@example.com"
            } }
        })))
        .mount(&server)
        .await;

    let users = service(&server, true).shared_users("img-1").await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, "carol");
    assert_eq!(users[0].email, "carol@example.com");
    assert_eq!(users[0].name.as_deref(), Some("Carol Reyes"));
}

#[tokio::test]
async fn shared_users_falls_back_to_bare_id_without_directory() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "viewer",
                    "resource": "image:img-1",
                    "target": "user:carol#tenant:t1"
                }
            ]),
            "getResourceRelations",
        ))
        .mount(&server)
        .await;

    // Member service unconfigured: lookups fail, display degrades.
    let users = service(&server, false).shared_users("img-1").await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, "carol");
    assert_eq!(users[0].email, "carol");
    assert_eq!(users[0].name, None);
}

#[tokio::test]
async fn is_owner_checks_the_exact_owner_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .respond_with(relations_response(
            serde_json::json!([
                {
                    "namespace": "metadata_item",
                    "relationDefinition": "owner",
                    "resource": "image:img-1",
                    "target": "user:alice"
                }
            ]),
            "getResourceRelations",
        ))
        .mount(&server)
        .await;

    let svc = service(&server, false);
    assert!(svc.is_owner("img-1", "alice").await.unwrap());
    assert!(!svc.is_owner("img-1", "bob").await.unwrap());
}

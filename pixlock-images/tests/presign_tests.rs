use pixlock_images::{ImageApiConfig, ImageError, PresignClient, UploadRequest};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PresignClient {
    PresignClient::new(ImageApiConfig::new(format!("{}/images", server.uri())))
}

#[tokio::test]
async fn upload_url_posts_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/upload-url"))
        .and(body_partial_json(serde_json::json!({
            "userId": "alice",
            "filename": "cat.png",
            "contentType": "image/png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uploadUrl": "https://bucket.s3.test/signed",
            "imageId": "img-1",
            "s3Key": "users/alice/img-1.png",
            "expiresIn": 300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let granted = client(&server)
        .upload_url(&UploadRequest {
            user_id: "alice".into(),
            filename: "cat.png".into(),
            content_type: "image/png".into(),
        })
        .await
        .unwrap();
    assert_eq!(granted.image_id, "img-1");
    assert_eq!(granted.s3_key, "users/alice/img-1.png");
}

#[tokio::test]
async fn upload_url_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/upload-url"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "contentType not allowed"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_url(&UploadRequest {
            user_id: "alice".into(),
            filename: "cat.bmp".into(),
            content_type: "image/bmp".into(),
        })
        .await
        .unwrap_err();
    match err {
        ImageError::Presign(msg) => assert_eq!(msg, "contentType not allowed"),
        other => panic!("expected Presign, got {other:?}"),
    }
}

#[tokio::test]
async fn download_url_sends_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/download-url"))
        .and(query_param("imageId", "img-1"))
        .and(query_param("userId", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "downloadUrl": "https://bucket.s3.test/signed-get",
            "s3Key": "users/alice/img-1.png",
            "expiresIn": 300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server).download_url("img-1", "alice").await.unwrap();
    assert_eq!(url.download_url, "https://bucket.s3.test/signed-get");
}

#[tokio::test]
async fn download_url_failure_without_body_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/download-url"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).download_url("missing", "alice").await.unwrap_err();
    match err {
        ImageError::Presign(msg) => assert_eq!(msg, "failed to generate download URL"),
        other => panic!("expected Presign, got {other:?}"),
    }
}

#[tokio::test]
async fn put_object_sets_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bucket/obj"))
        .and(wiremock::matchers::header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .put_object(&format!("{}/bucket/obj", server.uri()), "image/png", vec![1, 2, 3])
        .await
        .unwrap();
}

#[tokio::test]
async fn put_object_rejection_is_upload_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .put_object(&format!("{}/bucket/obj", server.uri()), "image/png", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, ImageError::Upload(_)));
}

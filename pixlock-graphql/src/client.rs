//! Authenticated GraphQL client.

use crate::error::{ClientError, ClientResult};
use pixlock_auth::TokenProvider;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Wire envelope every backend returns. Decoded exactly once, here.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    errors: Option<Vec<WireError>>,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
}

/// Client for one GraphQL-style endpoint.
///
/// Holds a `TokenProvider` capability instead of reading ambient session
/// state; every request pulls the token at call time and fails fast with
/// `AuthRequired` when none is available.
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    /// Human-readable service label used in error messages.
    service: String,
    tokens: Arc<dyn TokenProvider>,
}

impl GraphQlClient {
    pub fn new(
        endpoint: impl Into<String>,
        service: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            service: service.into(),
            tokens,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Executes a query or mutation and decodes `data` into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> ClientResult<T> {
        let token = self.tokens.token().ok_or(ClientError::AuthRequired)?;

        debug!(service = %self.service, "executing GraphQL operation");
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&token)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(ClientError::Transport(format!(
                "{} request failed: {reason}",
                self.service
            )));
        }

        let envelope: Envelope<T> = resp.json().await?;

        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.into_iter().next() {
                return Err(ClientError::Remote(first.message));
            }
        }

        envelope
            .data
            .ok_or_else(|| ClientError::EmptyResponse(self.service.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GraphQlClient {
        let tokens: Arc<dyn TokenProvider> = Arc::new(|| Some("jwt-test".to_string()));
        GraphQlClient::new(format!("{}/graphql", server.uri()), "test service", tokens)
    }

    #[derive(Debug, Deserialize)]
    struct Pong {
        pong: String,
    }

    #[tokio::test]
    async fn fails_fast_without_token() {
        let server = MockServer::start().await;
        let tokens: Arc<dyn TokenProvider> = Arc::new(|| None);
        let client =
            GraphQlClient::new(format!("{}/graphql", server.uri()), "test service", tokens);

        let result = client.execute::<Pong>("query { pong }", serde_json::json!({})).await;
        assert!(matches!(result.unwrap_err(), ClientError::AuthRequired));
        // No request ever reached the server.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer jwt-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "pong": "ok" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pong: Pong = client(&server)
            .execute("query { pong }", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(pong.pong, "ok");
    }

    #[tokio::test]
    async fn transport_error_carries_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client(&server)
            .execute::<Pong>("query { pong }", serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            ClientError::Transport(msg) => {
                assert!(msg.contains("test service"));
                assert!(msg.contains("Bad Gateway"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_remote_error_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": null,
                "errors": [
                    { "message": "relation already exists" },
                    { "message": "second error ignored" }
                ]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .execute::<Pong>("mutation { x }", serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            ClientError::Remote(msg) => assert_eq!(msg, "relation already exists"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_data_is_its_own_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": null })),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .execute::<Pong>("query { pong }", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn empty_error_list_is_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "pong": "ok" },
                "errors": []
            })))
            .mount(&server)
            .await;

        let pong: Pong = client(&server)
            .execute("query { pong }", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(pong.pong, "ok");
    }
}

//! Transport failure taxonomy.

use thiserror::Error;

/// Result type for backend client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced at the transport boundary.
///
/// No retries happen at this layer; retry policy, if any, belongs to the
/// caller. `Remote` is never safe to retry automatically, and mutations
/// should not be blindly retried on `Transport` either.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session token was available at call time. The request is never
    /// sent; the user must sign in.
    #[error("authentication required: no session token available")]
    AuthRequired,

    /// The HTTP layer reported a non-success status.
    #[error("{0}")]
    Transport(String),

    /// The backend accepted the request but reported a domain error.
    /// Carries the first error message verbatim.
    #[error("GraphQL error: {0}")]
    Remote(String),

    /// Success status but no data payload in the envelope.
    #[error("no data returned from {0}")]
    EmptyResponse(String),

    /// A service endpoint required for this operation is not configured.
    #[error("missing configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

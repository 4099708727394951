//! Presigned-URL API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the presigned-URL API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageApiConfig {
    /// Base URL of the signing API, e.g. "https://api.example.com/images".
    pub api_base_url: String,
}

impl ImageApiConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }
}

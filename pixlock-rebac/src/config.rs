//! Relation store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the relation store client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RebacConfig {
    /// GraphQL endpoint of the relation store.
    pub endpoint: String,
}

impl RebacConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

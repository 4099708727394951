//! Directory service configuration.

use serde::{Deserialize, Serialize};

/// Endpoints for the two directory services. Either may be absent, in
/// which case sharing features depending on it are disabled.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// GraphQL endpoint of the organization (tenant) service.
    pub org_endpoint: Option<String>,
    /// GraphQL endpoint of the member service.
    pub member_endpoint: Option<String>,
}

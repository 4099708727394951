//! Organization service client (tenant directory).

use crate::config::DirectoryConfig;
use crate::types::{Paginated, TenantSummary};
use pixlock_auth::TokenProvider;
use pixlock_graphql::{ClientError, ClientResult, GraphQlClient};
use serde::Deserialize;
use std::sync::Arc;

const LIST_TENANTS_QUERY: &str = r#"
  query ListTenants($page: Int, $pageSize: Int) {
    listTenants(page: $page, pageSize: $pageSize) {
      items {
        id
        name
      }
      page
      pageSize
      totalItems
      totalPages
    }
  }
"#;

#[derive(Deserialize)]
struct ListTenantsData {
    #[serde(rename = "listTenants")]
    tenants: Paginated<TenantSummary>,
}

/// Client for the tenant directory.
pub struct OrgServiceClient {
    graphql: Option<GraphQlClient>,
}

impl OrgServiceClient {
    pub fn new(config: &DirectoryConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            graphql: config
                .org_endpoint
                .clone()
                .map(|endpoint| GraphQlClient::new(endpoint, "org service", tokens)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.graphql.is_some()
    }

    fn graphql(&self) -> ClientResult<&GraphQlClient> {
        self.graphql.as_ref().ok_or_else(|| {
            ClientError::Config(
                "org service endpoint is not set; sharing is disabled".to_string(),
            )
        })
    }

    /// Lists tenants with pagination (page is zero-based).
    pub async fn list_tenants(
        &self,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Paginated<TenantSummary>> {
        let data: ListTenantsData = self
            .graphql()?
            .execute(
                LIST_TENANTS_QUERY,
                serde_json::json!({ "page": page, "pageSize": page_size }),
            )
            .await?;
        Ok(data.tenants)
    }
}

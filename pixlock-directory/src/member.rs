//! Member service client (per-tenant user directory).

use crate::config::DirectoryConfig;
use crate::types::{Member, Paginated, UserInfo};
use pixlock_auth::TokenProvider;
use pixlock_graphql::{ClientError, ClientResult, GraphQlClient};
use serde::Deserialize;
use std::sync::Arc;

const LIST_MEMBERS_QUERY: &str = r#"
  query ListMembers($tenantId: ID!, $page: Int, $pageSize: Int) {
    listMembers(tenantId: $tenantId, page: $page, pageSize: $pageSize) {
      items {
        loginId
        name
        email
        phone
        tenantId
      }
      page
      pageSize
      totalItems
      totalPages
    }
  }
"#;

const GET_USER_BY_ID_QUERY: &str = r#"
  query GetUserById($userId: String!) {
    getUserById(userId: $userId) {
      userId
      name
      email
    }
  }
"#;

#[derive(Deserialize)]
struct ListMembersData {
    #[serde(rename = "listMembers")]
    members: Paginated<Member>,
}

#[derive(Deserialize)]
struct GetUserData {
    #[serde(rename = "getUserById")]
    user: Option<UserInfo>,
}

/// Client for the member directory.
pub struct MemberServiceClient {
    graphql: Option<GraphQlClient>,
}

impl MemberServiceClient {
    pub fn new(config: &DirectoryConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            graphql: config
                .member_endpoint
                .clone()
                .map(|endpoint| GraphQlClient::new(endpoint, "member service", tokens)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.graphql.is_some()
    }

    fn graphql(&self) -> ClientResult<&GraphQlClient> {
        self.graphql.as_ref().ok_or_else(|| {
            ClientError::Config(
                "member service endpoint is not set; sharing is disabled".to_string(),
            )
        })
    }

    /// Lists members of a tenant with pagination (page is zero-based).
    pub async fn list_members(
        &self,
        tenant_id: &str,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Paginated<Member>> {
        let data: ListMembersData = self
            .graphql()?
            .execute(
                LIST_MEMBERS_QUERY,
                serde_json::json!({ "tenantId": tenant_id, "page": page, "pageSize": page_size }),
            )
            .await?;
        Ok(data.members)
    }

    /// Looks up a user by id. `Ok(None)` means the directory has no such
    /// user, which callers treat as "display the bare id".
    pub async fn get_user_by_id(&self, user_id: &str) -> ClientResult<Option<UserInfo>> {
        let data: GetUserData = self
            .graphql()?
            .execute(GET_USER_BY_ID_QUERY, serde_json::json!({ "userId": user_id }))
            .await?;
        Ok(data.user)
    }
}

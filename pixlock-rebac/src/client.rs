//! Relation store client.
//!
//! Four backend operations (relations by target, relations by resource,
//! batch create, batch delete) plus the image-level conveniences built on
//! them. The backend indexes by exact target string, so the owner target
//! and the tenant-scoped viewer target require separate lookups; there is
//! no wildcard query.

use crate::config::RebacConfig;
use crate::target::{user_target, viewer_target};
use crate::target::parse_viewer_target;
use crate::types::{RelationDef, RelationTuple};
use pixlock_auth::TokenProvider;
use pixlock_graphql::{ClientResult, GraphQlClient};
use serde::Deserialize;
use std::sync::Arc;

const TARGET_ACCESS_QUERY: &str = r#"
  query GetTargetAccess($targetId: String!) {
    getTargetAccess(targetId: $targetId) {
      relations {
        namespace
        relationDefinition
        resource
        target
      }
    }
  }
"#;

const RESOURCE_RELATIONS_QUERY: &str = r#"
  query GetResourceRelations($resourceId: String!) {
    getResourceRelations(resourceId: $resourceId) {
      relations {
        namespace
        relationDefinition
        resource
        target
      }
    }
  }
"#;

const CREATE_RELATIONS_MUTATION: &str = r#"
  mutation CreateRelations($input: RelationRequest!) {
    createRelations(input: $input) {
      message
    }
  }
"#;

const DELETE_RELATIONS_MUTATION: &str = r#"
  mutation DeleteRelations($input: RelationRequest!) {
    deleteRelations(input: $input)
  }
"#;

#[derive(Deserialize)]
struct RelationList {
    relations: Vec<RelationTuple>,
}

#[derive(Deserialize)]
struct TargetAccessData {
    #[serde(rename = "getTargetAccess")]
    access: RelationList,
}

#[derive(Deserialize)]
struct ResourceRelationsData {
    #[serde(rename = "getResourceRelations")]
    relations: RelationList,
}

#[derive(Deserialize)]
struct CreateRelationsData {
    #[serde(rename = "createRelations")]
    result: CreateMessage,
}

#[derive(Deserialize)]
struct CreateMessage {
    message: String,
}

#[derive(Deserialize)]
struct DeleteRelationsData {
    #[serde(rename = "deleteRelations")]
    deleted: bool,
}

/// Client for the relation store backend.
pub struct RelationStoreClient {
    graphql: GraphQlClient,
}

impl RelationStoreClient {
    pub fn new(config: RebacConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            graphql: GraphQlClient::new(config.endpoint, "relation store", tokens),
        }
    }

    /// All relations granted to an exact target string.
    pub async fn target_access(&self, target_id: &str) -> ClientResult<Vec<RelationTuple>> {
        let data: TargetAccessData = self
            .graphql
            .execute(TARGET_ACCESS_QUERY, serde_json::json!({ "targetId": target_id }))
            .await?;
        Ok(data.access.relations)
    }

    /// Relations for a user operating in a tenant context: the plain owner
    /// target and the tenant-scoped viewer target, looked up concurrently
    /// and merged once both complete.
    pub async fn target_access_with_tenant(
        &self,
        user_id: &str,
        tenant_id: &str,
    ) -> ClientResult<Vec<RelationTuple>> {
        let owner = user_target(user_id);
        let viewer = viewer_target(user_id, tenant_id);
        let (mut owned, scoped) = tokio::try_join!(
            self.target_access(&owner),
            self.target_access(&viewer),
        )?;
        owned.extend(scoped);
        Ok(owned)
    }

    /// All relations attached to a resource.
    pub async fn resource_relations(&self, resource_id: &str) -> ClientResult<Vec<RelationTuple>> {
        let data: ResourceRelationsData = self
            .graphql
            .execute(
                RESOURCE_RELATIONS_QUERY,
                serde_json::json!({ "resourceId": resource_id }),
            )
            .await?;
        Ok(data.relations.relations)
    }

    /// Creates a batch of relation tuples. Returns the backend's message.
    pub async fn create_relations(&self, tuples: &[RelationTuple]) -> ClientResult<String> {
        let data: CreateRelationsData = self
            .graphql
            .execute(
                CREATE_RELATIONS_MUTATION,
                serde_json::json!({ "input": { "relations": tuples } }),
            )
            .await?;
        Ok(data.result.message)
    }

    /// Deletes a batch of relation tuples. Returns the backend's verdict;
    /// deleting an absent tuple is whatever the backend says it is, with no
    /// local pre-check.
    pub async fn delete_relations(&self, tuples: &[RelationTuple]) -> ClientResult<bool> {
        let data: DeleteRelationsData = self
            .graphql
            .execute(
                DELETE_RELATIONS_MUTATION,
                serde_json::json!({ "input": { "relations": tuples } }),
            )
            .await?;
        Ok(data.deleted)
    }

    /// Records ownership of a freshly uploaded image. The image exists, as
    /// far as access control is concerned, the moment this tuple does.
    pub async fn create_image_ownership(
        &self,
        image_id: &str,
        user_id: &str,
    ) -> ClientResult<String> {
        self.create_relations(&[RelationTuple::image_owner(image_id, user_id)])
            .await
    }

    /// Grants tenant-scoped viewer access. Legacy unscoped grants are never
    /// issued from here.
    pub async fn create_viewer_relation(
        &self,
        image_id: &str,
        user_id: &str,
        tenant_id: &str,
    ) -> ClientResult<String> {
        self.create_relations(&[RelationTuple::image_viewer(image_id, user_id, tenant_id)])
            .await
    }

    /// Revokes a viewer grant for the exact scoped target.
    pub async fn delete_viewer_relation(
        &self,
        image_id: &str,
        user_id: &str,
        tenant_id: &str,
    ) -> ClientResult<bool> {
        self.delete_relations(&[RelationTuple::image_viewer(image_id, user_id, tenant_id)])
            .await
    }

    /// Tenant-scoped viewers of an image. Legacy-format viewer tuples are
    /// skipped, matching their exclusion from resolution.
    pub async fn image_viewers(
        &self,
        image_id: &str,
    ) -> ClientResult<Vec<crate::target::ViewerTarget>> {
        let relations = self
            .resource_relations(&crate::target::image_resource(image_id))
            .await?;
        Ok(relations
            .iter()
            .filter(|rel| rel.relation == RelationDef::Viewer)
            .filter_map(|rel| parse_viewer_target(&rel.target))
            .collect())
    }

    /// Whether the user holds the owner relation for an image.
    pub async fn is_image_owner(&self, image_id: &str, user_id: &str) -> ClientResult<bool> {
        let relations = self
            .resource_relations(&crate::target::image_resource(image_id))
            .await?;
        let target = user_target(user_id);
        Ok(relations
            .iter()
            .any(|rel| rel.relation == RelationDef::Owner && rel.target == target))
    }
}

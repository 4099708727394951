//! Share and unshare workflows.
//!
//! Sharing is a three-step wizard: pick a tenant, pick a member of that
//! tenant, confirm. The state machine is explicit and rendering-agnostic;
//! a UI drives it and draws whatever the current step is. Unsharing is a
//! single-step action with no wizard.

use crate::error::{ImageError, ImageResult};
use pixlock_directory::{Member, MemberServiceClient, OrgServiceClient, TenantSummary};
use pixlock_rebac::RelationStoreClient;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Current wizard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareStep {
    /// Choosing which tenant to share into.
    Tenant,
    /// Choosing a member of the selected tenant.
    User,
    /// Awaiting explicit confirmation of the selected member.
    Confirm,
}

/// A viewer grant issued by a completed share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareGrant {
    pub image_id: String,
    pub user_id: String,
    pub tenant_id: String,
}

/// Share wizard state machine for one image.
///
/// Every grant it issues is tenant-scoped; the wizard cannot produce a
/// legacy-format viewer relation.
#[derive(Debug)]
pub struct ShareWizard {
    image_id: String,
    /// Login ids that already hold viewer access; these members are
    /// excluded from the selectable list to prevent duplicate shares.
    existing_viewers: HashSet<String>,
    step: ShareStep,
    tenants: Vec<TenantSummary>,
    members: Vec<Member>,
    selected_tenant: Option<TenantSummary>,
    selected_member: Option<Member>,
}

impl ShareWizard {
    pub fn new(
        image_id: impl Into<String>,
        existing_viewers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            existing_viewers: existing_viewers.into_iter().collect(),
            step: ShareStep::Tenant,
            tenants: Vec::new(),
            members: Vec::new(),
            selected_tenant: None,
            selected_member: None,
        }
    }

    pub fn step(&self) -> ShareStep {
        self.step
    }

    pub fn tenants(&self) -> &[TenantSummary] {
        &self.tenants
    }

    /// Members available for selection (already-shared members excluded).
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn selected_tenant(&self) -> Option<&TenantSummary> {
        self.selected_tenant.as_ref()
    }

    pub fn selected_member(&self) -> Option<&Member> {
        self.selected_member.as_ref()
    }

    /// Loads the tenant list. Stays on the tenant step; there is no
    /// auto-advance, the user must pick.
    pub async fn load_tenants(&mut self, org: &OrgServiceClient) -> ImageResult<()> {
        let page = org.list_tenants(0, 20).await?;
        self.tenants = page.items;
        Ok(())
    }

    /// Picks a tenant and loads its members, moving to the user step.
    pub async fn select_tenant(
        &mut self,
        tenant_id: &str,
        members: &MemberServiceClient,
    ) -> ImageResult<()> {
        let Some(tenant) = self.tenants.iter().find(|t| t.id == tenant_id).cloned() else {
            return Err(ImageError::Workflow(format!("unknown tenant {tenant_id}")));
        };

        let page = members.list_members(&tenant.id, 0, 20).await?;
        self.members = page
            .items
            .into_iter()
            .filter(|member| !self.existing_viewers.contains(&member.login_id))
            .collect();
        self.selected_tenant = Some(tenant);
        self.selected_member = None;
        self.step = ShareStep::User;
        Ok(())
    }

    /// Picks a member from the available list, moving to confirmation.
    pub fn select_member(&mut self, login_id: &str) -> ImageResult<()> {
        if self.step != ShareStep::User {
            return Err(ImageError::Workflow(
                "no tenant selected yet".to_string(),
            ));
        }
        let Some(member) = self.members.iter().find(|m| m.login_id == login_id).cloned() else {
            return Err(ImageError::Workflow(format!(
                "member {login_id} is not selectable"
            )));
        };
        self.selected_member = Some(member);
        self.step = ShareStep::Confirm;
        Ok(())
    }

    /// Steps backward, dropping the selection made at the current step.
    pub fn back(&mut self) {
        match self.step {
            ShareStep::Tenant => {}
            ShareStep::User => {
                self.selected_tenant = None;
                self.selected_member = None;
                self.members.clear();
                self.step = ShareStep::Tenant;
            }
            ShareStep::Confirm => {
                self.selected_member = None;
                self.step = ShareStep::User;
            }
        }
    }

    /// Cancel: drops all transient selection state. Nothing leaks into the
    /// next invocation.
    pub fn reset(&mut self) {
        self.tenants.clear();
        self.members.clear();
        self.selected_tenant = None;
        self.selected_member = None;
        self.step = ShareStep::Tenant;
    }

    /// Issues the viewer grant for the confirmed selection.
    ///
    /// On failure the wizard stays on the confirm step so the caller can
    /// retry; on success it resets for the next share.
    pub async fn confirm(&mut self, relations: &RelationStoreClient) -> ImageResult<ShareGrant> {
        if self.step != ShareStep::Confirm {
            return Err(ImageError::Workflow("nothing to confirm".to_string()));
        }
        let (Some(tenant), Some(member)) =
            (self.selected_tenant.as_ref(), self.selected_member.as_ref())
        else {
            return Err(ImageError::Workflow("no member selected".to_string()));
        };

        relations
            .create_viewer_relation(&self.image_id, &member.login_id, &tenant.id)
            .await?;

        let grant = ShareGrant {
            image_id: self.image_id.clone(),
            user_id: member.login_id.clone(),
            tenant_id: tenant.id.clone(),
        };
        info!(
            image_id = %grant.image_id,
            user_id = %grant.user_id,
            tenant_id = %grant.tenant_id,
            "image shared"
        );
        self.reset();
        Ok(grant)
    }
}

/// Orchestrates sharing workflows over the relation store.
pub struct ShareManager {
    relations: Arc<RelationStoreClient>,
}

impl ShareManager {
    pub fn new(relations: Arc<RelationStoreClient>) -> Self {
        Self { relations }
    }

    /// Starts a share wizard for an image, excluding users that already
    /// hold viewer access.
    pub fn wizard(
        &self,
        image_id: impl Into<String>,
        existing_viewers: impl IntoIterator<Item = String>,
    ) -> ShareWizard {
        ShareWizard::new(image_id, existing_viewers)
    }

    /// Completes a wizard's confirmed share.
    pub async fn share(&self, wizard: &mut ShareWizard) -> ImageResult<ShareGrant> {
        wizard.confirm(&self.relations).await
    }

    /// Revokes a viewer grant for the exact scoped target. Repeating the
    /// call surfaces only whatever the backend reports; there is no local
    /// pre-check.
    pub async fn unshare(
        &self,
        image_id: &str,
        user_id: &str,
        tenant_id: &str,
    ) -> ImageResult<bool> {
        let deleted = self
            .relations
            .delete_viewer_relation(image_id, user_id, tenant_id)
            .await?;
        info!(%image_id, %user_id, %tenant_id, "viewer access revoked");
        Ok(deleted)
    }
}

//! Storage-backed invitation repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::invitation::{
    Invitation, InvitationId, InvitationRepository, InvitationStatus,
};
use crate::domain::organization::OrganizationId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of InvitationRepository
#[derive(Debug)]
pub struct StorageInvitationRepository {
    storage: Arc<dyn Storage<Invitation>>,
}

impl StorageInvitationRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Invitation>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl InvitationRepository for StorageInvitationRepository {
    async fn get(&self, id: &InvitationId) -> Result<Option<Invitation>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_active(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Invitation>, DomainError> {
        let invitations = self.storage.list().await?;
        Ok(invitations.into_iter().find(|i| {
            i.organization_id() == organization_id && i.email() == email && i.is_active()
        }))
    }

    async fn list_pending(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Invitation>, DomainError> {
        let invitations = self.storage.list().await?;
        let mut result: Vec<Invitation> = invitations
            .into_iter()
            .filter(|i| {
                i.organization_id() == organization_id
                    && i.status() == InvitationStatus::Pending
            })
            .collect();

        result.sort_by_key(|i| i.created_at());
        Ok(result)
    }

    async fn create(&self, invitation: Invitation) -> Result<Invitation, DomainError> {
        let pending = self.storage.list().await?.into_iter().find(|i| {
            i.organization_id() == invitation.organization_id()
                && i.email() == invitation.email()
                && i.status() == InvitationStatus::Pending
        });

        if let Some(mut stale) = pending {
            if stale.is_active() {
                return Err(DomainError::conflict(format!(
                    "Active invitation for '{}' already exists in '{}'",
                    invitation.email(),
                    invitation.organization_id()
                )));
            }
            // A lapsed record keeps its pending status until a replacement
            // arrives; finalize it so the pending-pair constraint admits
            // the new one
            stale.expire();
            self.storage.update(stale).await?;
        }

        // Racing creates for the same pair are serialized by the storage
        // layer's pending-pair constraint, not by the check above
        self.storage.create(invitation).await
    }

    async fn update(&self, invitation: Invitation) -> Result<Invitation, DomainError> {
        if !self.storage.exists(invitation.id()).await? {
            return Err(DomainError::not_found(format!(
                "Invitation '{}' not found",
                invitation.id()
            )));
        }

        self.storage.update(invitation).await
    }
}

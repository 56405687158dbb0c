//! Storage-backed membership repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::member::{Membership, MembershipId, MembershipRepository, OrgRole};
use crate::domain::organization::OrganizationId;
use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of MembershipRepository
#[derive(Debug)]
pub struct StorageMembershipRepository {
    storage: Arc<dyn Storage<Membership>>,
}

impl StorageMembershipRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Membership>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MembershipRepository for StorageMembershipRepository {
    async fn get(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_org_and_user(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, DomainError> {
        let memberships = self.storage.list().await?;
        Ok(memberships
            .into_iter()
            .find(|m| m.organization_id() == organization_id && m.user_id() == user_id))
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.storage.list().await?;
        let mut result: Vec<Membership> = memberships
            .into_iter()
            .filter(|m| m.organization_id() == organization_id)
            .collect();

        // Join order
        result.sort_by_key(|m| m.created_at());
        Ok(result)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.storage.list().await?;
        let mut result: Vec<Membership> = memberships
            .into_iter()
            .filter(|m| m.user_id() == user_id)
            .collect();

        result.sort_by_key(|m| m.created_at());
        Ok(result)
    }

    async fn count_owners(&self, organization_id: &OrganizationId) -> Result<usize, DomainError> {
        let memberships = self.storage.list().await?;
        Ok(memberships
            .iter()
            .filter(|m| m.organization_id() == organization_id && m.role() == OrgRole::Owner)
            .count())
    }

    async fn create(&self, membership: Membership) -> Result<Membership, DomainError> {
        let existing = self
            .find_by_org_and_user(membership.organization_id(), membership.user_id())
            .await?;

        if existing.is_some() {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a membership in '{}'",
                membership.user_id(),
                membership.organization_id()
            )));
        }

        // Racing creates for the same pair are serialized by the storage
        // layer's (organization, user) constraint, not by the check above
        self.storage.create(membership).await
    }

    async fn update(&self, membership: Membership) -> Result<Membership, DomainError> {
        if !self.storage.exists(membership.id()).await? {
            return Err(DomainError::not_found(format!(
                "Membership '{}' not found",
                membership.id()
            )));
        }

        self.storage.update(membership).await
    }

    async fn delete(&self, id: &MembershipId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }
}

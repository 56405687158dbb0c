//! Invitation repository trait

use async_trait::async_trait;

use super::entity::{Invitation, InvitationId};
use crate::domain::organization::OrganizationId;
use crate::domain::DomainError;

/// Repository for invitations
///
/// Implementations must enforce at most one active (pending, unexpired)
/// invitation per (organization, email) pair on the create path. That guard
/// lives at the storage layer because multiple service instances may race on
/// the same pair.
#[async_trait]
pub trait InvitationRepository: Send + Sync + std::fmt::Debug {
    /// Get an invitation by ID
    async fn get(&self, id: &InvitationId) -> Result<Option<Invitation>, DomainError>;

    /// Find the active invitation for an (organization, normalized email)
    /// pair, if any
    async fn find_active(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Invitation>, DomainError>;

    /// List invitations of an organization with pending status, ordered by
    /// creation time ascending. Callers filter lazily-expired records.
    async fn list_pending(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Invitation>, DomainError>;

    /// Create a new invitation; fails with `Conflict` when an active
    /// invitation already exists for the same (organization, email) pair
    async fn create(&self, invitation: Invitation) -> Result<Invitation, DomainError>;

    /// Update an existing invitation
    async fn update(&self, invitation: Invitation) -> Result<Invitation, DomainError>;
}

//! Membership repository trait

use async_trait::async_trait;

use super::entity::{Membership, MembershipId};
use crate::domain::organization::OrganizationId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for memberships
///
/// Implementations must enforce at most one membership per
/// (organization, user) pair on the create path.
#[async_trait]
pub trait MembershipRepository: Send + Sync + std::fmt::Debug {
    /// Get a membership by ID
    async fn get(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Find a user's membership within an organization
    async fn find_by_org_and_user(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, DomainError>;

    /// List memberships of an organization, ordered by join time ascending
    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Membership>, DomainError>;

    /// List all memberships held by a user across organizations
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError>;

    /// Count memberships with the owner role in an organization
    async fn count_owners(&self, organization_id: &OrganizationId) -> Result<usize, DomainError>;

    /// Create a new membership
    async fn create(&self, membership: Membership) -> Result<Membership, DomainError>;

    /// Update an existing membership
    async fn update(&self, membership: Membership) -> Result<Membership, DomainError>;

    /// Delete a membership, returning whether it existed
    async fn delete(&self, id: &MembershipId) -> Result<bool, DomainError>;
}

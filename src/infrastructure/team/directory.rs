//! Read-only team roster and invitation queries

use std::sync::Arc;

use tracing::warn;

use crate::domain::invitation::{Invitation, InvitationRepository};
use crate::domain::member::{Membership, MembershipRepository};
use crate::domain::organization::OrganizationId;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// A roster entry: membership paired with the user's profile
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub membership: Membership,
    pub user: User,
}

/// Read-only queries over an organization's team
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    memberships: Arc<dyn MembershipRepository>,
    invitations: Arc<dyn InvitationRepository>,
    users: Arc<dyn UserRepository>,
}

impl TeamDirectory {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        invitations: Arc<dyn InvitationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            memberships,
            invitations,
            users,
        }
    }

    /// The organization's members in join order, each paired with the user
    /// profile. Empty organizations yield an empty list, not an error.
    pub async fn team_members(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<TeamMember>, DomainError> {
        let memberships = self
            .memberships
            .list_for_organization(organization_id)
            .await?;

        let mut members = Vec::with_capacity(memberships.len());

        for membership in memberships {
            match self.users.get(membership.user_id()).await? {
                Some(user) => members.push(TeamMember { membership, user }),
                None => {
                    // A membership without a profile indicates a seeding bug;
                    // skip it rather than failing the whole roster read
                    warn!(
                        organization = %organization_id,
                        user = %membership.user_id(),
                        "Membership references missing user profile"
                    );
                }
            }
        }

        Ok(members)
    }

    /// Pending, unexpired invitations for the organization.
    ///
    /// Lazily excludes records past their expiry timestamp; stored status is
    /// never mutated on the read path.
    pub async fn pending_invitations(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Invitation>, DomainError> {
        let pending = self.invitations.list_pending(organization_id).await?;
        Ok(pending.into_iter().filter(|i| i.is_active()).collect())
    }
}

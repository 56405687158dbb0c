//! Role-based permission evaluation

use std::sync::Arc;

use tracing::debug;

use crate::domain::member::{Capability, Membership, MembershipRepository};
use crate::domain::organization::OrganizationId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Maps (organization, user, capability) to allow/deny.
///
/// Read-only and side-effect free. A caller without a membership simply has
/// no capability; that is a normal outcome, never an error.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    memberships: Arc<dyn MembershipRepository>,
}

impl PermissionEvaluator {
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Whether the user holds the capability in the organization
    pub async fn has_permission(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        capability: Capability,
    ) -> Result<bool, DomainError> {
        match self.membership(organization_id, user_id).await? {
            Some(membership) => Ok(membership.role().allows(capability)),
            None => {
                debug!(
                    organization = %organization_id,
                    user = %user_id,
                    "Permission check for non-member"
                );
                Ok(false)
            }
        }
    }

    /// Require the capability, returning the caller's membership.
    ///
    /// Convenience for mutation paths: missing membership and missing
    /// capability both surface as `Forbidden`.
    pub async fn require(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        capability: Capability,
    ) -> Result<Membership, DomainError> {
        let membership = self
            .membership(organization_id, user_id)
            .await?
            .ok_or_else(|| DomainError::forbidden("Forbidden"))?;

        if !membership.role().allows(capability) {
            return Err(DomainError::forbidden("Forbidden"));
        }

        Ok(membership)
    }

    /// The caller's membership in the organization, if any
    pub async fn membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, DomainError> {
        self.memberships
            .find_by_org_and_user(organization_id, user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::{Membership, MockMembershipRepository, OrgRole};

    fn org() -> OrganizationId {
        OrganizationId::new("acme").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn evaluator_with(roles: &[(&str, OrgRole)]) -> PermissionEvaluator {
        let repo = MockMembershipRepository::new();
        for (name, role) in roles {
            repo.seed(Membership::new(org(), user(name), *role));
        }
        PermissionEvaluator::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_non_member_has_no_capability() {
        let evaluator = evaluator_with(&[]);

        let allowed = evaluator
            .has_permission(&org(), &user("ghost"), Capability::ViewTeam)
            .await
            .unwrap();
        assert!(!allowed);
    }

    #[tokio::test]
    async fn test_viewer_can_read_only() {
        let evaluator = evaluator_with(&[("dana", OrgRole::Viewer)]);

        assert!(evaluator
            .has_permission(&org(), &user("dana"), Capability::ViewTeam)
            .await
            .unwrap());
        assert!(!evaluator
            .has_permission(&org(), &user("dana"), Capability::InviteMember)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_owner_has_all_capabilities() {
        let evaluator = evaluator_with(&[("alice", OrgRole::Owner)]);

        for capability in [
            Capability::ViewTeam,
            Capability::InviteMember,
            Capability::UpdateMemberRole,
            Capability::RemoveMember,
        ] {
            assert!(evaluator
                .has_permission(&org(), &user("alice"), capability)
                .await
                .unwrap());
        }
    }

    #[tokio::test]
    async fn test_require_forbidden_for_non_member() {
        let evaluator = evaluator_with(&[]);

        let result = evaluator
            .require(&org(), &user("ghost"), Capability::ViewTeam)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_require_forbidden_for_missing_capability() {
        let evaluator = evaluator_with(&[("bob", OrgRole::Member)]);

        let result = evaluator
            .require(&org(), &user("bob"), Capability::InviteMember)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_require_returns_membership() {
        let evaluator = evaluator_with(&[("alice", OrgRole::Admin)]);

        let membership = evaluator
            .require(&org(), &user("alice"), Capability::InviteMember)
            .await
            .unwrap();
        assert_eq!(membership.role(), OrgRole::Admin);
    }
}

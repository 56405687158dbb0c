//! Membership mutations - role changes and removals

use std::sync::Arc;

use tracing::info;

use super::permission::PermissionEvaluator;
use crate::domain::member::{Capability, Membership, MembershipId, MembershipRepository, OrgRole};
use crate::domain::organization::OrganizationId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Mutates memberships under the rank and last-owner rules
#[derive(Debug, Clone)]
pub struct MembershipMutator {
    memberships: Arc<dyn MembershipRepository>,
    permissions: PermissionEvaluator,
}

impl MembershipMutator {
    pub fn new(memberships: Arc<dyn MembershipRepository>, permissions: PermissionEvaluator) -> Self {
        Self {
            memberships,
            permissions,
        }
    }

    /// Change a member's role.
    ///
    /// Rules, applied in order: the caller must hold the role-update
    /// capability, the target must exist in the organization, the sole owner
    /// cannot be demoted, and the caller must outrank both the target's
    /// current role and the role being granted.
    pub async fn update_role(
        &self,
        organization_id: &OrganizationId,
        membership_id: &MembershipId,
        new_role: OrgRole,
        caller: &UserId,
    ) -> Result<Membership, DomainError> {
        let caller_membership = self
            .permissions
            .require(organization_id, caller, Capability::UpdateMemberRole)
            .await?;

        let target = self.target(organization_id, membership_id).await?;

        if target.role() == OrgRole::Owner
            && new_role != OrgRole::Owner
            && self.memberships.count_owners(organization_id).await? <= 1
        {
            return Err(DomainError::invariant("Cannot demote the last owner"));
        }

        if !caller_membership.role().may_act_on(target.role())
            || (new_role == OrgRole::Owner && caller_membership.role() != OrgRole::Owner)
        {
            return Err(DomainError::forbidden("Insufficient privilege"));
        }

        if target.role() == new_role {
            return Ok(target);
        }

        let previous = target.role();
        let mut target = target;
        target.set_role(new_role);
        let target = self.memberships.update(target).await?;

        info!(
            organization = %organization_id,
            membership = %membership_id,
            from = %previous,
            to = %new_role,
            "Member role updated"
        );

        Ok(target)
    }

    /// Remove a member from the organization.
    ///
    /// A member may always remove themselves regardless of capability or
    /// rank. Either way, removing the sole owner is rejected.
    pub async fn remove(
        &self,
        organization_id: &OrganizationId,
        membership_id: &MembershipId,
        caller: &UserId,
    ) -> Result<(), DomainError> {
        let target = self
            .memberships
            .get(membership_id)
            .await?
            .filter(|m| m.organization_id() == organization_id);

        let target = match target {
            Some(target) if target.user_id() == caller => target,
            target => {
                let caller_membership = self
                    .permissions
                    .require(organization_id, caller, Capability::RemoveMember)
                    .await?;

                let target =
                    target.ok_or_else(|| DomainError::not_found("Member not found"))?;

                self.check_not_last_owner(organization_id, &target).await?;

                if !caller_membership.role().may_act_on(target.role()) {
                    return Err(DomainError::forbidden("Insufficient privilege"));
                }

                self.memberships.delete(membership_id).await?;

                info!(
                    organization = %organization_id,
                    membership = %membership_id,
                    "Member removed"
                );

                return Ok(());
            }
        };

        self.check_not_last_owner(organization_id, &target).await?;
        self.memberships.delete(membership_id).await?;

        info!(
            organization = %organization_id,
            membership = %membership_id,
            "Member left organization"
        );

        Ok(())
    }

    async fn target(
        &self,
        organization_id: &OrganizationId,
        membership_id: &MembershipId,
    ) -> Result<Membership, DomainError> {
        self.memberships
            .get(membership_id)
            .await?
            .filter(|m| m.organization_id() == organization_id)
            .ok_or_else(|| DomainError::not_found("Member not found"))
    }

    async fn check_not_last_owner(
        &self,
        organization_id: &OrganizationId,
        target: &Membership,
    ) -> Result<(), DomainError> {
        if target.role() == OrgRole::Owner
            && self.memberships.count_owners(organization_id).await? <= 1
        {
            return Err(DomainError::invariant("Cannot remove the last owner"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MockMembershipRepository;

    fn org() -> OrganizationId {
        OrganizationId::new("acme").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        memberships: Arc<MockMembershipRepository>,
        mutator: MembershipMutator,
    }

    fn fixture() -> Fixture {
        let memberships = Arc::new(MockMembershipRepository::new());
        let permissions = PermissionEvaluator::new(memberships.clone());
        let mutator = MembershipMutator::new(memberships.clone(), permissions);
        Fixture {
            memberships,
            mutator,
        }
    }

    fn seed(f: &Fixture, id: &str, role: OrgRole) -> Membership {
        let membership = Membership::new(org(), user(id), role);
        f.memberships.seed(membership.clone());
        membership
    }

    #[tokio::test]
    async fn test_member_cannot_update_roles() {
        let f = fixture();
        seed(&f, "bob", OrgRole::Member);
        let dana = seed(&f, "dana", OrgRole::Viewer);

        let result = f
            .mutator
            .update_role(&org(), dana.id(), OrgRole::Member, &user("bob"))
            .await;
        match result {
            Err(DomainError::Forbidden { message }) => assert_eq!(message, "Forbidden"),
            other => panic!("expected forbidden, got {:?}", other.map(|m| m.role())),
        }
    }

    #[tokio::test]
    async fn test_update_unknown_member_not_found() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);

        let result = f
            .mutator
            .update_role(&org(), &MembershipId::generate(), OrgRole::Admin, &user("alice"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_sole_owner_cannot_demote_self() {
        let f = fixture();
        let alice = seed(&f, "alice", OrgRole::Owner);

        let result = f
            .mutator
            .update_role(&org(), alice.id(), OrgRole::Admin, &user("alice"))
            .await;
        match result {
            Err(DomainError::InvariantViolation { message }) => {
                assert_eq!(message, "Cannot demote the last owner");
            }
            other => panic!("expected invariant violation, got {:?}", other.map(|m| m.role())),
        }
    }

    #[tokio::test]
    async fn test_owner_demotion_allowed_with_second_owner() {
        let f = fixture();
        let alice = seed(&f, "alice", OrgRole::Owner);
        seed(&f, "erin", OrgRole::Owner);

        let updated = f
            .mutator
            .update_role(&org(), alice.id(), OrgRole::Admin, &user("alice"))
            .await
            .unwrap();
        assert_eq!(updated.role(), OrgRole::Admin);
    }

    #[tokio::test]
    async fn test_admin_cannot_touch_admin_or_owner() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);
        seed(&f, "carol", OrgRole::Admin);
        let alice_id = f
            .memberships
            .find_by_org_and_user(&org(), &user("alice"))
            .await
            .unwrap()
            .unwrap();
        seed(&f, "frank", OrgRole::Admin);
        let frank = f
            .memberships
            .find_by_org_and_user(&org(), &user("frank"))
            .await
            .unwrap()
            .unwrap();

        for target in [alice_id.id(), frank.id()] {
            let result = f
                .mutator
                .update_role(&org(), target, OrgRole::Member, &user("carol"))
                .await;
            match result {
                Err(DomainError::Forbidden { message }) => {
                    assert_eq!(message, "Insufficient privilege");
                }
                other => panic!("expected forbidden, got {:?}", other.map(|m| m.role())),
            }
        }
    }

    #[tokio::test]
    async fn test_admin_cannot_grant_owner() {
        let f = fixture();
        seed(&f, "carol", OrgRole::Admin);
        let bob = seed(&f, "bob", OrgRole::Member);

        let result = f
            .mutator
            .update_role(&org(), bob.id(), OrgRole::Owner, &user("carol"))
            .await;
        match result {
            Err(DomainError::Forbidden { message }) => {
                assert_eq!(message, "Insufficient privilege");
            }
            other => panic!("expected forbidden, got {:?}", other.map(|m| m.role())),
        }
    }

    #[tokio::test]
    async fn test_admin_promotes_member_to_member_roles() {
        let f = fixture();
        seed(&f, "carol", OrgRole::Admin);
        let dana = seed(&f, "dana", OrgRole::Viewer);

        let updated = f
            .mutator
            .update_role(&org(), dana.id(), OrgRole::Member, &user("carol"))
            .await
            .unwrap();
        assert_eq!(updated.role(), OrgRole::Member);
    }

    #[tokio::test]
    async fn test_same_role_update_is_noop() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);
        let bob = seed(&f, "bob", OrgRole::Member);

        let updated = f
            .mutator
            .update_role(&org(), bob.id(), OrgRole::Member, &user("alice"))
            .await
            .unwrap();
        assert_eq!(updated.role(), OrgRole::Member);
        assert_eq!(updated.updated_at(), bob.updated_at());
    }

    #[tokio::test]
    async fn test_remove_member() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);
        let bob = seed(&f, "bob", OrgRole::Member);

        f.mutator
            .remove(&org(), bob.id(), &user("alice"))
            .await
            .unwrap();

        assert!(f
            .memberships
            .find_by_org_and_user(&org(), &user("bob"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_viewer_cannot_remove_others() {
        let f = fixture();
        seed(&f, "dana", OrgRole::Viewer);
        let bob = seed(&f, "bob", OrgRole::Member);

        let result = f.mutator.remove(&org(), bob.id(), &user("dana")).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_viewer_can_remove_self() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);
        let dana = seed(&f, "dana", OrgRole::Viewer);

        f.mutator
            .remove(&org(), dana.id(), &user("dana"))
            .await
            .unwrap();

        assert!(f
            .memberships
            .find_by_org_and_user(&org(), &user("dana"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_sole_owner_cannot_remove_self() {
        let f = fixture();
        let alice = seed(&f, "alice", OrgRole::Owner);

        let result = f.mutator.remove(&org(), alice.id(), &user("alice")).await;
        match result {
            Err(DomainError::InvariantViolation { message }) => {
                assert_eq!(message, "Cannot remove the last owner");
            }
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_owner_can_leave_with_second_owner() {
        let f = fixture();
        let alice = seed(&f, "alice", OrgRole::Owner);
        seed(&f, "erin", OrgRole::Owner);

        f.mutator
            .remove(&org(), alice.id(), &user("alice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_admin_cannot_remove_admin() {
        let f = fixture();
        seed(&f, "carol", OrgRole::Admin);
        let frank = seed(&f, "frank", OrgRole::Admin);

        let result = f.mutator.remove(&org(), frank.id(), &user("carol")).await;
        match result {
            Err(DomainError::Forbidden { message }) => {
                assert_eq!(message, "Insufficient privilege");
            }
            other => panic!("expected forbidden, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove_unknown_member_not_found() {
        let f = fixture();
        seed(&f, "alice", OrgRole::Owner);

        let result = f
            .mutator
            .remove(&org(), &MembershipId::generate(), &user("alice"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

//! Invitation lifecycle - create and cancel invitations

use std::sync::Arc;

use tracing::{info, warn};

use super::permission::PermissionEvaluator;
use crate::domain::invitation::{Invitation, InvitationId, InvitationRepository};
use crate::domain::member::{Capability, MembershipRepository, OrgRole};
use crate::domain::notification::Notifier;
use crate::domain::organization::{OrganizationId, OrganizationRepository};
use crate::domain::user::{normalize_email, validate_email, UserId, UserRepository};
use crate::domain::DomainError;

/// Creates and cancels invitations, enforcing uniqueness and expiry rules
#[derive(Clone)]
pub struct InvitationLifecycle {
    invitations: Arc<dyn InvitationRepository>,
    memberships: Arc<dyn MembershipRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    users: Arc<dyn UserRepository>,
    permissions: PermissionEvaluator,
    notifier: Arc<dyn Notifier>,
    expiry_days: i64,
}

impl std::fmt::Debug for InvitationLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvitationLifecycle")
            .field("expiry_days", &self.expiry_days)
            .finish()
    }
}

impl InvitationLifecycle {
    pub fn new(
        invitations: Arc<dyn InvitationRepository>,
        memberships: Arc<dyn MembershipRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        users: Arc<dyn UserRepository>,
        permissions: PermissionEvaluator,
        notifier: Arc<dyn Notifier>,
        expiry_days: i64,
    ) -> Self {
        Self {
            invitations,
            memberships,
            organizations,
            users,
            permissions,
            notifier,
            expiry_days,
        }
    }

    /// Invite a new member by email.
    ///
    /// Preconditions, first failure wins:
    /// 1. the proposed role must not be owner,
    /// 2. the inviter must hold the invite capability,
    /// 3. the email must not belong to an existing member,
    /// 4. no active invitation may exist for the (organization, email) pair.
    pub async fn invite(
        &self,
        organization_id: &OrganizationId,
        email: &str,
        role: OrgRole,
        inviter: &UserId,
    ) -> Result<Invitation, DomainError> {
        if !role.invitable() {
            return Err(DomainError::validation(
                "Cannot invite as owner; transfer ownership via a role update",
            ));
        }

        self.permissions
            .require(organization_id, inviter, Capability::InviteMember)
            .await?;

        let email = normalize_email(email);
        validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(user) = self.users.find_by_email(&email).await? {
            let existing = self
                .memberships
                .find_by_org_and_user(organization_id, user.id())
                .await?;

            if existing.is_some() {
                return Err(DomainError::conflict("User is already a member"));
            }
        }

        if self
            .invitations
            .find_active(organization_id, &email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("Invitation already pending"));
        }

        let invitation = Invitation::new(
            organization_id.clone(),
            email,
            role,
            inviter.clone(),
            self.expiry_days,
        );

        let invitation = self.invitations.create(invitation).await?;

        info!(
            organization = %organization_id,
            invitation = %invitation.id(),
            role = %role,
            "Invitation created"
        );

        self.dispatch_notification(invitation.clone()).await;

        Ok(invitation)
    }

    /// Cancel a pending invitation. Cancellation is terminal; re-inviting
    /// requires a fresh invitation.
    pub async fn cancel(
        &self,
        organization_id: &OrganizationId,
        invitation_id: &InvitationId,
        caller: &UserId,
    ) -> Result<(), DomainError> {
        self.permissions
            .require(organization_id, caller, Capability::InviteMember)
            .await?;

        let invitation = self
            .invitations
            .get(invitation_id)
            .await?
            .filter(|i| i.organization_id() == organization_id && i.is_active())
            .ok_or_else(|| DomainError::not_found("Invitation not found"))?;

        let mut invitation = invitation;
        invitation.cancel();
        self.invitations.update(invitation).await?;

        info!(
            organization = %organization_id,
            invitation = %invitation_id,
            "Invitation cancelled"
        );

        Ok(())
    }

    /// Fire-and-forget notification dispatch. The invitation record is the
    /// source of truth; delivery failures are logged and never surface.
    async fn dispatch_notification(&self, invitation: Invitation) {
        let organization_name = match self.organizations.get(invitation.organization_id()).await {
            Ok(Some(organization)) => organization.name().to_string(),
            _ => invitation.organization_id().to_string(),
        };

        let notifier = self.notifier.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.notify_invited(&invitation, &organization_name).await {
                warn!(
                    invitation = %invitation.id(),
                    error = %e,
                    "Invitation notification failed"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invitation::MockInvitationRepository;
    use crate::domain::member::{Membership, MockMembershipRepository};
    use crate::domain::notification::MockNotifier;
    use crate::domain::organization::{MockOrganizationRepository, Organization};
    use crate::domain::user::{MockUserRepository, User};

    fn org() -> OrganizationId {
        OrganizationId::new("acme").unwrap()
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Fixture {
        memberships: Arc<MockMembershipRepository>,
        invitations: Arc<MockInvitationRepository>,
        users: Arc<MockUserRepository>,
        lifecycle: InvitationLifecycle,
    }

    async fn fixture() -> Fixture {
        fixture_with_notifier(quiet_notifier()).await
    }

    fn quiet_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_invited().returning(|_, _| Ok(()));
        notifier
    }

    async fn fixture_with_notifier(notifier: MockNotifier) -> Fixture {
        let memberships = Arc::new(MockMembershipRepository::new());
        let invitations = Arc::new(MockInvitationRepository::new());
        let organizations = Arc::new(MockOrganizationRepository::new());
        let users = Arc::new(MockUserRepository::new());

        organizations
            .create(Organization::new(org(), "Acme Corp", "acme").unwrap())
            .await
            .unwrap();

        let permissions = PermissionEvaluator::new(memberships.clone());
        let lifecycle = InvitationLifecycle::new(
            invitations.clone(),
            memberships.clone(),
            organizations,
            users.clone(),
            permissions,
            Arc::new(notifier),
            7,
        );

        Fixture {
            memberships,
            invitations,
            users,
            lifecycle,
        }
    }

    async fn seed_member(f: &Fixture, id: &str, role: OrgRole) {
        f.users
            .upsert(User::new(user_id(id), format!("{}@x.com", id), id).unwrap())
            .await
            .unwrap();
        f.memberships.seed(Membership::new(org(), user_id(id), role));
    }

    #[tokio::test]
    async fn test_invite_as_owner_rejected() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;

        let result = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Owner, &user_id("alice"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_member_cannot_invite() {
        let f = fixture().await;
        seed_member(&f, "bob", OrgRole::Member).await;

        let result = f
            .lifecycle
            .invite(&org(), "carol@x.com", OrgRole::Member, &user_id("bob"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        // Nothing persisted
        assert!(f
            .invitations
            .find_active(&org(), "carol@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_invite_existing_member_conflicts() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;
        seed_member(&f, "bob", OrgRole::Member).await;

        let result = f
            .lifecycle
            .invite(&org(), " Bob@X.com ", OrgRole::Member, &user_id("alice"))
            .await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "User is already a member");
            }
            other => panic!("expected conflict, got {:?}", other.map(|i| i.status())),
        }
    }

    #[tokio::test]
    async fn test_duplicate_invite_conflicts_once_then_cancel_frees() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;

        let first = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Admin, &user_id("alice"))
            .await
            .unwrap();

        let second = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Admin, &user_id("alice"))
            .await;
        match second {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Invitation already pending");
            }
            other => panic!("expected conflict, got {:?}", other.map(|i| i.status())),
        }

        f.lifecycle
            .cancel(&org(), first.id(), &user_id("alice"))
            .await
            .unwrap();

        // A fresh invitation for the same email succeeds after cancellation
        f.lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Admin, &user_id("alice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invite_normalizes_email() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Admin).await;

        let invitation = f
            .lifecycle
            .invite(&org(), "  New.Hire@Example.COM ", OrgRole::Viewer, &user_id("alice"))
            .await
            .unwrap();

        assert_eq!(invitation.email(), "new.hire@example.com");
        assert_eq!(invitation.role(), OrgRole::Viewer);
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_invite() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_invited()
            .returning(|_, _| Err(DomainError::internal("smtp down")));

        let f = fixture_with_notifier(notifier).await;
        seed_member(&f, "alice", OrgRole::Owner).await;

        let invitation = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Member, &user_id("alice"))
            .await
            .unwrap();

        // The record is the source of truth regardless of delivery
        assert!(f
            .invitations
            .get(invitation.id())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_cancel_unknown_invitation_not_found() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;

        let result = f
            .lifecycle
            .cancel(&org(), &InvitationId::generate(), &user_id("alice"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_cancel_requires_invite_capability() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;
        seed_member(&f, "dana", OrgRole::Viewer).await;

        let invitation = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Member, &user_id("alice"))
            .await
            .unwrap();

        let result = f
            .lifecycle
            .cancel(&org(), invitation.id(), &user_id("dana"))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_cancel_is_terminal() {
        let f = fixture().await;
        seed_member(&f, "alice", OrgRole::Owner).await;

        let invitation = f
            .lifecycle
            .invite(&org(), "bob@x.com", OrgRole::Member, &user_id("alice"))
            .await
            .unwrap();

        f.lifecycle
            .cancel(&org(), invitation.id(), &user_id("alice"))
            .await
            .unwrap();

        // Cancelling again: the invitation is no longer pending
        let result = f
            .lifecycle
            .cancel(&org(), invitation.id(), &user_id("alice"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

//! Organization provisioning and lookup

use std::sync::Arc;

use tracing::info;

use crate::domain::member::{Membership, MembershipRepository, OrgRole};
use crate::domain::organization::{
    slugify, Organization, OrganizationId, OrganizationRepository,
};
use crate::domain::user::{Identity, User, UserRepository};
use crate::domain::DomainError;

const MAX_SLUG_ATTEMPTS: u32 = 50;

/// Provisions and resolves organizations
#[derive(Debug, Clone)]
pub struct OrganizationService {
    organizations: Arc<dyn OrganizationRepository>,
    memberships: Arc<dyn MembershipRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrganizationService {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        memberships: Arc<dyn MembershipRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            organizations,
            memberships,
            users,
        }
    }

    /// Ensure the user has at least one organization, creating a personal
    /// workspace with an owner membership on first sign-in.
    ///
    /// Idempotent: a user who already belongs to an organization gets their
    /// earliest one back and nothing is created.
    pub async fn ensure_default_for(
        &self,
        identity: &Identity,
    ) -> Result<Organization, DomainError> {
        let user = User::new(
            identity.user_id.clone(),
            identity.email.clone(),
            identity.name.clone(),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;
        self.users.upsert(user).await?;

        let mut memberships = self.memberships.list_for_user(&identity.user_id).await?;
        memberships.sort_by_key(|m| m.created_at());

        if let Some(membership) = memberships.first() {
            return self
                .organizations
                .get(membership.organization_id())
                .await?
                .ok_or_else(|| DomainError::not_found("Organization not found"));
        }

        let slug = self.available_slug(&identity.email).await?;
        let id = OrganizationId::new(slug.clone())
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let name = format!("{}'s Workspace", self.display_name(identity));

        let organization = Organization::new(id, name, slug)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let organization = self.organizations.create(organization).await?;

        self.memberships
            .create(Membership::new(
                organization.id().clone(),
                identity.user_id.clone(),
                OrgRole::Owner,
            ))
            .await?;

        info!(
            organization = %organization.id(),
            user = %identity.user_id,
            "Default organization provisioned"
        );

        Ok(organization)
    }

    pub async fn get(&self, id: &OrganizationId) -> Result<Organization, DomainError> {
        self.organizations
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization not found"))
    }

    /// Derive a free slug from the email local part, appending a numeric
    /// suffix when taken.
    async fn available_slug(&self, email: &str) -> Result<String, DomainError> {
        let local_part = email.split('@').next().unwrap_or(email);
        let base = slugify(local_part);

        if self.organizations.find_by_slug(&base).await?.is_none() {
            return Ok(base);
        }

        for n in 2..=MAX_SLUG_ATTEMPTS {
            let candidate = format!("{}-{}", base, n);
            if self.organizations.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(DomainError::internal("Could not allocate a workspace slug"))
    }

    fn display_name<'a>(&self, identity: &'a Identity) -> &'a str {
        let name = identity.name.trim();
        if name.is_empty() {
            identity.email.split('@').next().unwrap_or("New User")
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MockMembershipRepository;
    use crate::domain::organization::MockOrganizationRepository;
    use crate::domain::user::{MockUserRepository, UserId};

    fn identity(id: &str, email: &str, name: &str) -> Identity {
        Identity::new(UserId::new(id).unwrap(), email, name)
    }

    struct Fixture {
        memberships: Arc<MockMembershipRepository>,
        users: Arc<MockUserRepository>,
        service: OrganizationService,
    }

    fn fixture() -> Fixture {
        let organizations = Arc::new(MockOrganizationRepository::new());
        let memberships = Arc::new(MockMembershipRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let service = OrganizationService::new(
            organizations,
            memberships.clone(),
            users.clone(),
        );
        Fixture {
            memberships,
            users,
            service,
        }
    }

    #[tokio::test]
    async fn test_first_sign_in_provisions_workspace() {
        let f = fixture();

        let org = f
            .service
            .ensure_default_for(&identity("alice", "alice@example.com", "Alice"))
            .await
            .unwrap();

        assert_eq!(org.slug(), "alice");
        assert_eq!(org.name(), "Alice's Workspace");

        let memberships = f
            .memberships
            .list_for_user(&UserId::new("alice").unwrap())
            .await
            .unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].role(), OrgRole::Owner);

        // Profile persisted alongside
        assert!(f
            .users
            .get(&UserId::new("alice").unwrap())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_ensure_default_is_idempotent() {
        let f = fixture();
        let who = identity("alice", "alice@example.com", "Alice");

        let first = f.service.ensure_default_for(&who).await.unwrap();
        let second = f.service.ensure_default_for(&who).await.unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(
            f.memberships
                .list_for_user(&UserId::new("alice").unwrap())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_slug_collision_gets_numeric_suffix() {
        let f = fixture();

        let first = f
            .service
            .ensure_default_for(&identity("alice1", "alice@one.com", "Alice"))
            .await
            .unwrap();
        let second = f
            .service
            .ensure_default_for(&identity("alice2", "alice@two.com", "Alice"))
            .await
            .unwrap();

        assert_eq!(first.slug(), "alice");
        assert_eq!(second.slug(), "alice-2");
    }

    #[tokio::test]
    async fn test_blank_name_falls_back_to_email_local_part() {
        let f = fixture();

        let org = f
            .service
            .ensure_default_for(&identity("bob", "bob.smith@example.com", "  "))
            .await
            .unwrap();

        assert_eq!(org.name(), "bob.smith's Workspace");
        assert_eq!(org.slug(), "bob-smith");
    }

    #[tokio::test]
    async fn test_get_unknown_organization() {
        let f = fixture();

        let result = f
            .service
            .get(&OrganizationId::new("ghost").unwrap())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

//! Membership entity, roles and capabilities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::organization::OrganizationId;
use crate::domain::storage::{StorageEntity, StorageKey, UniqueGuard};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Membership identifier - UUID v4 in hyphenated string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MembershipId(String);

impl MembershipId {
    /// Generate a fresh membership ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an existing membership ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        Uuid::parse_str(&id)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid membership ID", id)))?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MembershipId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MembershipId> for String {
    fn from(id: MembershipId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MembershipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for MembershipId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named permission gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View the team roster and pending invitations
    ViewTeam,
    /// Invite a new member
    InviteMember,
    /// Change another member's role
    UpdateMemberRole,
    /// Remove a member from the organization
    RemoveMember,
}

/// Role of a user within an organization.
///
/// The explicit discriminants pin the total privilege order:
/// `viewer < member < admin < owner`. Capabilities are monotonic in this
/// order - anything granted to a rank is granted to every higher rank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Read-only access
    Viewer = 0,
    /// Regular member
    #[default]
    Member = 1,
    /// Can manage members and invitations
    Admin = 2,
    /// Full organization control
    Owner = 3,
}

impl OrgRole {
    /// All roles, highest privilege first
    pub const ALL: [OrgRole; 4] = [Self::Owner, Self::Admin, Self::Member, Self::Viewer];

    /// Whether this role grants the given capability
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewTeam => *self >= Self::Viewer,
            Capability::InviteMember
            | Capability::UpdateMemberRole
            | Capability::RemoveMember => *self >= Self::Admin,
        }
    }

    /// Whether a caller with this role may act on a target with the given
    /// role when updating or removing members. Owners may act on anyone;
    /// admins only on targets of strictly lower rank.
    pub fn may_act_on(&self, target: OrgRole) -> bool {
        match self {
            Self::Owner => true,
            Self::Admin => target < Self::Admin,
            _ => false,
        }
    }

    /// Whether this role can be proposed on an invitation. Ownership is
    /// never granted by invite; it transfers via an explicit role update.
    pub fn invitable(&self) -> bool {
        !matches!(self, Self::Owner)
    }
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
            Self::Member => write!(f, "member"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for OrgRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            other => Err(DomainError::validation(format!(
                "'{}' is not a valid role",
                other
            ))),
        }
    }
}

/// Membership entity - binds one user to one organization with one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier
    id: MembershipId,
    /// Owning organization
    organization_id: OrganizationId,
    /// The member's user ID
    user_id: UserId,
    /// Role within the organization
    role: OrgRole,
    /// Join timestamp - also the roster ordering key
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Membership {
    /// Create a new membership
    pub fn new(organization_id: OrganizationId, user_id: UserId, role: OrgRole) -> Self {
        let now = Utc::now();

        Self {
            id: MembershipId::generate(),
            organization_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &MembershipId {
        &self.id
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> OrgRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owner(&self) -> bool {
        self.role == OrgRole::Owner
    }

    // Mutators

    /// Change the member's role
    pub fn set_role(&mut self, role: OrgRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Membership {
    type Key = MembershipId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    /// At most one membership per (organization, user)
    fn unique_guards() -> Vec<UniqueGuard<Self>> {
        vec![UniqueGuard {
            name: "org_user",
            key_of: |m| Some(format!("{}:{}", m.organization_id, m.user_id)),
            index_expression: "(data->>'organization_id'), (data->>'user_id')",
            index_predicate: None,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org() -> OrganizationId {
        OrganizationId::new("acme").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_membership_id_roundtrip() {
        let id = MembershipId::generate();
        let parsed = MembershipId::new(id.as_str()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_membership_id_invalid() {
        assert!(MembershipId::new("not-a-uuid").is_err());
    }

    #[test]
    fn test_role_order() {
        assert!(OrgRole::Owner > OrgRole::Admin);
        assert!(OrgRole::Admin > OrgRole::Member);
        assert!(OrgRole::Member > OrgRole::Viewer);
    }

    #[test]
    fn test_capability_table() {
        assert!(OrgRole::Viewer.allows(Capability::ViewTeam));
        assert!(!OrgRole::Viewer.allows(Capability::InviteMember));

        assert!(OrgRole::Member.allows(Capability::ViewTeam));
        assert!(!OrgRole::Member.allows(Capability::UpdateMemberRole));
        assert!(!OrgRole::Member.allows(Capability::RemoveMember));

        assert!(OrgRole::Admin.allows(Capability::InviteMember));
        assert!(OrgRole::Admin.allows(Capability::UpdateMemberRole));
        assert!(OrgRole::Admin.allows(Capability::RemoveMember));

        assert!(OrgRole::Owner.allows(Capability::InviteMember));
        assert!(OrgRole::Owner.allows(Capability::UpdateMemberRole));
        assert!(OrgRole::Owner.allows(Capability::RemoveMember));
    }

    #[test]
    fn test_capability_monotonic_in_rank() {
        let capabilities = [
            Capability::ViewTeam,
            Capability::InviteMember,
            Capability::UpdateMemberRole,
            Capability::RemoveMember,
        ];

        for capability in capabilities {
            for window in OrgRole::ALL.windows(2) {
                let (higher, lower) = (window[0], window[1]);
                if lower.allows(capability) {
                    assert!(
                        higher.allows(capability),
                        "{} allows {:?} but {} does not",
                        lower,
                        capability,
                        higher
                    );
                }
            }
        }
    }

    #[test]
    fn test_may_act_on() {
        assert!(OrgRole::Owner.may_act_on(OrgRole::Owner));
        assert!(OrgRole::Owner.may_act_on(OrgRole::Admin));

        assert!(!OrgRole::Admin.may_act_on(OrgRole::Owner));
        assert!(!OrgRole::Admin.may_act_on(OrgRole::Admin));
        assert!(OrgRole::Admin.may_act_on(OrgRole::Member));
        assert!(OrgRole::Admin.may_act_on(OrgRole::Viewer));

        assert!(!OrgRole::Member.may_act_on(OrgRole::Viewer));
    }

    #[test]
    fn test_invitable_roles() {
        assert!(!OrgRole::Owner.invitable());
        assert!(OrgRole::Admin.invitable());
        assert!(OrgRole::Member.invitable());
        assert!(OrgRole::Viewer.invitable());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<OrgRole>().unwrap(), OrgRole::Admin);
        assert!("superuser".parse::<OrgRole>().is_err());
    }

    #[test]
    fn test_membership_creation() {
        let membership = Membership::new(org(), user("alice"), OrgRole::Owner);

        assert_eq!(membership.organization_id().as_str(), "acme");
        assert_eq!(membership.user_id().as_str(), "alice");
        assert!(membership.is_owner());
    }

    #[test]
    fn test_membership_set_role() {
        let mut membership = Membership::new(org(), user("bob"), OrgRole::Member);

        membership.set_role(OrgRole::Admin);
        assert_eq!(membership.role(), OrgRole::Admin);
        assert!(!membership.is_owner());
    }
}

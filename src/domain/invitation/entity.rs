//! Invitation entity and lifecycle states

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::member::OrgRole;
use crate::domain::organization::OrganizationId;
use crate::domain::storage::{StorageEntity, StorageKey, UniqueGuard};
use crate::domain::user::{normalize_email, UserId};
use crate::domain::DomainError;

/// Default validity window for new invitations
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Invitation identifier - UUID v4 in hyphenated string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvitationId(String);

impl InvitationId {
    /// Generate a fresh invitation ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an existing invitation ID
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        Uuid::parse_str(&id)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid invitation ID", id)))?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InvitationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InvitationId> for String {
    fn from(id: InvitationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InvitationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for InvitationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Status of an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Awaiting acceptance
    #[default]
    Pending,
    /// Accepted by the invitee (external flow)
    Accepted,
    /// Cancelled by an authorized inviter - terminal
    Cancelled,
    /// Past its expiry timestamp
    Expired,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Invitation entity - a pending offer of membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier
    id: InvitationId,
    /// Inviting organization
    organization_id: OrganizationId,
    /// Normalized target email
    email: String,
    /// Proposed role (never owner)
    role: OrgRole,
    /// The inviting user
    invited_by: UserId,
    /// Current status
    status: InvitationStatus,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Expiry timestamp
    expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a new pending invitation valid for `expiry_days` days
    pub fn new(
        organization_id: OrganizationId,
        email: impl Into<String>,
        role: OrgRole,
        invited_by: UserId,
        expiry_days: i64,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: InvitationId::generate(),
            organization_id,
            email: normalize_email(&email.into()),
            role,
            invited_by,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + Duration::days(expiry_days),
        }
    }

    // Getters

    pub fn id(&self) -> &InvitationId {
        &self.id
    }

    pub fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> OrgRole {
        self.role
    }

    pub fn invited_by(&self) -> &UserId {
        &self.invited_by
    }

    pub fn status(&self) -> InvitationStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the expiry timestamp has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Pending and not yet expired.
    ///
    /// Expiry is evaluated lazily; reads never flip the stored status.
    pub fn is_active(&self) -> bool {
        self.status == InvitationStatus::Pending && !self.is_expired()
    }

    // Transitions

    /// Cancel a pending invitation - terminal
    pub fn cancel(&mut self) {
        self.status = InvitationStatus::Cancelled;
    }

    /// Mark as accepted (driven by the external acceptance flow)
    pub fn accept(&mut self) {
        self.status = InvitationStatus::Accepted;
    }

    /// Finalize a pending invitation whose expiry window has passed
    pub fn expire(&mut self) {
        self.status = InvitationStatus::Expired;
    }

    #[cfg(test)]
    pub fn expire_now_for_test(&mut self) {
        self.expires_at = Utc::now() - Duration::seconds(1);
    }
}

impl StorageEntity for Invitation {
    type Key = InvitationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    /// At most one pending invitation per (organization, email)
    fn unique_guards() -> Vec<UniqueGuard<Self>> {
        vec![UniqueGuard {
            name: "pending_pair",
            key_of: |i| {
                (i.status == InvitationStatus::Pending)
                    .then(|| format!("{}:{}", i.organization_id, i.email))
            },
            index_expression: "(data->>'organization_id'), (data->>'email')",
            index_predicate: Some("data->>'status' = 'pending'"),
        }]
    }
}

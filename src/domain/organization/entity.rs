//! Organization entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_organization_id, validate_organization_name, validate_slug,
    OrganizationValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Organization identifier - lowercase alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Create a new OrganizationId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, OrganizationValidationError> {
        let id = id.into();
        validate_organization_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = OrganizationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrganizationId> for String {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for OrganizationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Subscription tier of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Business,
    Enterprise,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Pro => write!(f, "pro"),
            Self::Business => write!(f, "business"),
            Self::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// Organization entity - the tenant boundary owning memberships
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier
    id: OrganizationId,
    /// Display name
    name: String,
    /// URL-safe unique slug
    slug: String,
    /// Subscription tier
    tier: SubscriptionTier,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new organization
    pub fn new(
        id: OrganizationId,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, OrganizationValidationError> {
        let name = name.into();
        validate_organization_name(&name)?;
        let slug = slug.into();
        validate_slug(&slug)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            slug,
            tier: SubscriptionTier::Free,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the subscription tier (builder pattern)
    pub fn with_tier(mut self, tier: SubscriptionTier) -> Self {
        self.tier = tier;
        self
    }

    // Getters

    pub fn id(&self) -> &OrganizationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), OrganizationValidationError> {
        let name = name.into();
        validate_organization_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Change the subscription tier
    pub fn set_tier(&mut self, tier: SubscriptionTier) {
        self.tier = tier;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Organization {
    type Key = OrganizationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

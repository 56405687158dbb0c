//! Organization endpoint response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::organization::{Organization, SubscriptionTier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub organization_id: String,
    pub name: String,
    pub slug: String,
    pub tier: SubscriptionTier,
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            organization_id: organization.id().as_str().to_string(),
            name: organization.name().to_string(),
            slug: organization.slug().to_string(),
            tier: organization.tier(),
            created_at: organization.created_at(),
        }
    }
}

//! Organization repository trait

use async_trait::async_trait;

use super::entity::{Organization, OrganizationId};
use crate::domain::DomainError;

/// Repository for organizations
#[async_trait]
pub trait OrganizationRepository: Send + Sync + std::fmt::Debug {
    /// Get an organization by ID
    async fn get(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError>;

    /// Find an organization by its unique slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError>;

    /// Create a new organization
    async fn create(&self, organization: Organization) -> Result<Organization, DomainError>;

    /// Update an existing organization
    async fn update(&self, organization: Organization) -> Result<Organization, DomainError>;

    /// Check if an organization exists
    async fn exists(&self, id: &OrganizationId) -> Result<bool, DomainError>;
}

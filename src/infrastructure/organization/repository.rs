//! Storage-backed organization repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::organization::{Organization, OrganizationId, OrganizationRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of OrganizationRepository
#[derive(Debug)]
pub struct StorageOrganizationRepository {
    storage: Arc<dyn Storage<Organization>>,
}

impl StorageOrganizationRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Organization>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl OrganizationRepository for StorageOrganizationRepository {
    async fn get(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError> {
        let organizations = self.storage.list().await?;
        Ok(organizations.into_iter().find(|o| o.slug() == slug))
    }

    async fn create(&self, organization: Organization) -> Result<Organization, DomainError> {
        if self.find_by_slug(organization.slug()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Organization slug '{}' already taken",
                organization.slug()
            )));
        }

        self.storage.create(organization).await
    }

    async fn update(&self, organization: Organization) -> Result<Organization, DomainError> {
        if !self.storage.exists(organization.id()).await? {
            return Err(DomainError::not_found(format!(
                "Organization '{}' not found",
                organization.id()
            )));
        }

        self.storage.update(organization).await
    }

    async fn exists(&self, id: &OrganizationId) -> Result<bool, DomainError> {
        self.storage.exists(id).await
    }
}

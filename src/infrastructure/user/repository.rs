//! Storage-backed user repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.storage.list().await?;
        Ok(users.into_iter().find(|u| u.email() == email))
    }

    async fn upsert(&self, user: User) -> Result<User, DomainError> {
        self.storage.upsert(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn repo() -> StorageUserRepository {
        StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new()))
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = repo();
        let user = User::new(UserId::new("alice").unwrap(), "alice@x.com", "Alice").unwrap();

        repo.upsert(user.clone()).await.unwrap();
        assert!(repo.get(user.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = repo();
        repo.upsert(User::new(UserId::new("bob").unwrap(), "Bob@X.com", "Bob").unwrap())
            .await
            .unwrap();

        assert!(repo.find_by_email("bob@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("ghost@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let repo = repo();
        let user = User::new(UserId::new("carol").unwrap(), "carol@x.com", "Carol").unwrap();

        repo.upsert(user.clone()).await.unwrap();
        repo.upsert(user.clone()).await.unwrap();

        assert!(repo.get(user.id()).await.unwrap().is_some());
    }
}

//! Generic storage abstraction for domain aggregates
//!
//! Repositories are built on top of this: a storage backend only knows how to
//! persist whole records keyed by a string id, while repositories add the
//! domain-specific lookups (by organization, by email, ...) on top.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Trait for types usable as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// The key in string form, for backends that key records by string
    fn as_str(&self) -> &str;
}

/// Uniqueness constraint over an entity type, beyond the primary key.
///
/// Backends enforce these atomically with the insert: the in-memory store
/// checks `key_of` under its write lock, the Postgres store builds a unique
/// expression index from `index_expression`/`index_predicate`. Concurrent
/// service instances rely on this, not on repository pre-checks.
pub struct UniqueGuard<E> {
    /// Constraint name, also used to name the backing index
    pub name: &'static str,
    /// Guard key for a record, or `None` when the record sits outside the
    /// guarded subset
    pub key_of: fn(&E) -> Option<String>,
    /// SQL expression list the index covers
    pub index_expression: &'static str,
    /// SQL predicate restricting the index to the guarded subset
    pub index_predicate: Option<&'static str>,
}

/// Trait for aggregates that can be persisted as a single record
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Uniqueness constraints enforced by the backend on create
    fn unique_guards() -> Vec<UniqueGuard<Self>> {
        Vec::new()
    }
}

/// Storage backend for a single entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity,
{
    /// Point lookup by key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// All records for this entity type
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Insert a new record; fails with `Conflict` if the key already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replace an existing record; fails with `NotFound` if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Insert or replace a record
    async fn upsert(&self, entity: E) -> Result<E, DomainError>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Whether a record with the given key exists
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Number of stored records
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct SampleId(String);

    impl StorageKey for SampleId {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Sample {
        id: SampleId,
        label: String,
    }

    impl StorageEntity for Sample {
        type Key = SampleId;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    #[test]
    fn test_key_string_form() {
        let sample = Sample {
            id: SampleId("record-1".to_string()),
            label: "first".to_string(),
        };
        assert_eq!(sample.key().as_str(), "record-1");
    }
}

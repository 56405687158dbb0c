//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{connect_pool, PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Factory producing storage instances for each entity type.
///
/// With the Postgres backend all entity tables share one connection pool.
#[derive(Debug)]
pub enum StorageFactory {
    InMemory,
    Postgres { pool: PgPool },
}

impl StorageFactory {
    /// Creates an in-memory factory
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Connects a PostgreSQL-backed factory
    pub async fn postgres(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = connect_pool(config).await?;
        Ok(Self::Postgres { pool })
    }

    /// Creates a storage instance for one entity type, backed by the given
    /// table when running on Postgres
    pub async fn create<E>(&self, table_name: &str) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self {
            Self::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Self::Postgres { pool } => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table_name);
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }
}

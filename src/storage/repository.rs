//! Storage-agnostic data access contracts.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The repository's entity has no backing table in the store.
    #[error("repository for `{entity}` is not bound: {reason}")]
    Configuration { entity: &'static str, reason: String },

    /// The store rejected or failed the operation.
    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Lazily evaluated handle over every entity of type `T`.
///
/// Building one does no I/O; the store is only touched by `count` and `slice`.
#[async_trait]
pub trait EntityQuery<T: Send + 'static>: Send + Sync {
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Entities in stable primary-key order, skipping `offset` and returning at most `limit`.
    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, RepositoryError>;
}

/// Read/write access to entities of type `T`. The only mutator of the store.
#[async_trait]
pub trait Repository<T: Send + 'static>: Clone + Send + Sync + 'static {
    type Query: EntityQuery<T>;

    fn get_all(&self) -> Self::Query;

    /// Persists and commits `entity` immediately, returning it with generated fields set.
    async fn save(&self, entity: T) -> Result<T, RepositoryError>;
}

//! SQLite-backed repository.

use crate::domain::model::Entity;
use crate::storage::repository::{EntityQuery, Repository, RepositoryError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Repository for a single entity type backed by a `SqlitePool`.
///
/// The table binding is checked on first use and cached once it succeeds.
pub struct SqliteRepository<T> {
    pool: SqlitePool,
    bound: Arc<OnceCell<()>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            bound: self.bound.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> SqliteRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            bound: Arc::new(OnceCell::new()),
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_bound(&self) -> Result<(), RepositoryError> {
        self.bound
            .get_or_try_init(|| async move {
                let exists: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                )
                .bind(T::table_name())
                .fetch_one(&self.pool)
                .await?;
                if exists == 0 {
                    return Err(RepositoryError::Configuration {
                        entity: std::any::type_name::<T>(),
                        reason: format!("table `{}` does not exist", T::table_name()),
                    });
                }
                tracing::debug!(table = T::table_name(), "repository bound");
                Ok::<(), RepositoryError>(())
            })
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for SqliteRepository<T> {
    type Query = SqliteQuery<T>;

    fn get_all(&self) -> SqliteQuery<T> {
        SqliteQuery {
            repository: self.clone(),
        }
    }

    async fn save(&self, entity: T) -> Result<T, RepositoryError> {
        self.ensure_bound().await?;

        let columns = T::insert_columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::table_name(),
            columns.join(", "),
            placeholders
        );

        // Autocommit: the single INSERT is its own transaction.
        let result = entity
            .bind_insert(sqlx::query(&sql))
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(table = T::table_name(), id, "entity saved");
        Ok(entity.with_id(id))
    }
}

/// `SELECT` over the whole table, evaluated only when counted or sliced.
pub struct SqliteQuery<T> {
    repository: SqliteRepository<T>,
}

#[async_trait]
impl<T: Entity> EntityQuery<T> for SqliteQuery<T> {
    async fn count(&self) -> Result<u64, RepositoryError> {
        self.repository.ensure_bound().await?;
        let sql = format!("SELECT COUNT(*) FROM {}", T::table_name());
        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(self.repository.pool())
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, RepositoryError> {
        self.repository.ensure_bound().await?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} ASC LIMIT ? OFFSET ?",
            T::columns().join(", "),
            T::table_name(),
            T::primary_key_field()
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(self.repository.pool())
            .await?;
        Ok(rows)
    }
}

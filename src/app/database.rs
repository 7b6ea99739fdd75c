//! Database bootstrap.
//!
//! Owns the SQLite pool and creates entity tables at startup. Reads and writes go
//! through repositories, never through this type.

use crate::domain::model::Entity;
use crate::infra::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects to the configured store.
    ///
    /// An in-memory database lives only as long as its connections, so it is pinned to
    /// a single connection that is never reaped.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool = if is_in_memory(&config.url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?
        };

        tracing::info!(url = %config.url, "connected to database");
        Ok(Self { pool })
    }

    /// Fresh private in-memory store.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect(&DatabaseConfig::default()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the table for `T` if it does not exist yet.
    pub async fn create_schema<T: Entity>(&self) -> anyhow::Result<()> {
        sqlx::query(T::create_table_sql())
            .execute(&self.pool)
            .await?;
        tracing::debug!(table = T::table_name(), "schema ready");
        Ok(())
    }

    /// Round-trips a trivial statement.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

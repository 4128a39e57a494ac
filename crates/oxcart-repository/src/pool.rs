//! Database connection pool management.

use oxcart_config::DatabaseConfig;
use oxcart_core::{OxcartError, OxcartResult};
use sqlx::mysql::{MySql, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::Transaction;
use std::time::Duration;
use tracing::{info, warn};

/// Relational store pool wrapper.
///
/// Request handlers check out a connection per operation; multi-step
/// mutations run inside an explicit transaction obtained from [`begin`]
/// (rollback on drop, commit only on success). Background workers create
/// their own scope per batch and never share a request-scoped handle.
///
/// [`begin`]: DatabasePool::begin
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> OxcartResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                OxcartError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");
        Ok(Self { pool })
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Checks out a single connection.
    pub async fn acquire(&self) -> OxcartResult<PoolConnection<MySql>> {
        Ok(self.pool.acquire().await?)
    }

    /// Begins a transaction. The transaction rolls back when dropped
    /// without an explicit commit.
    pub async fn begin(&self) -> OxcartResult<Transaction<'_, MySql>> {
        Ok(self.pool.begin().await?)
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> OxcartResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| OxcartError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> OxcartResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| OxcartError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

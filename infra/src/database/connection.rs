//! Postgres connection pool construction

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use us_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Build a Postgres connection pool from configuration.
///
/// The pool itself is externally managed state: this crate only constructs
/// it; lifecycle beyond that belongs to the process.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, InfrastructureError> {
    tracing::info!(
        max_connections = config.max_connections,
        "creating database connection pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
        .map_err(|e| InfrastructureError::Database(format!("failed to connect: {e}")))
}

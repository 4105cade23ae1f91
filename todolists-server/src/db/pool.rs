//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and a bounded wait
//! for connections, so an unreachable database fails the request instead
//! of hanging it.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool sizing and timeouts
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            // Requests hold a connection for one or two statements
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a PostgreSQL connection pool with default settings.
///
/// # Errors
///
/// Returns an error if no connection can be established.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/todos").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom settings.
pub async fn create_pool_with_options(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = settings.max_connections,
        "connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p todolists-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn unreachable_database_is_an_error() {
        let settings = PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(500),
        };
        // Nothing listens on port 1
        let result = create_pool_with_options("postgres://127.0.0.1:1/todos", settings).await;
        assert!(result.is_err());
    }

    #[test]
    fn default_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(5));
    }
}

//! Database connection pool and the PostgreSQL-backed stores.
//!
//! Supabase is hosted PostgreSQL, so the service talks to it directly with
//! `sqlx`. The schema is owned by the hosted project; nothing here creates
//! or migrates tables.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{api_key::ApiKey, event::EventRow},
    store::{EventStore, KeyStore},
};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Configuration
///
/// - Maximum connections: 5
/// - Connections are created lazily as needed and reused across requests
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server
/// cannot be reached.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Key and event store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgStore {
    async fn find_active_key(&self, api_key: &str) -> Result<Option<ApiKey>, AppError> {
        let record = sqlx::query_as::<_, ApiKey>(
            "SELECT id, api_key, active
             FROM door_api_keys
             WHERE api_key = $1 AND active = true
             LIMIT 1",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn list_events(&self) -> Result<Vec<EventRow>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, starts_at, city, venue, xceed_event_ref, xceed_url
            FROM events
            ORDER BY starts_at DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

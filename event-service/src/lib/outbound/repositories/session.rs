use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::session::errors::SessionError;
use crate::domain::session::ports::SessionStore;

/// Session liveness records kept in the `sessions` table.
///
/// Expired rows are filtered on read and replaced on the next login.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (key, value, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::Store(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let row = sqlx::query(
            r#"
            SELECT value
            FROM sessions
            WHERE key = $1 AND expires_at > now()
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::Store(e.to_string()))?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| SessionError::Store(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;

        Ok(())
    }
}

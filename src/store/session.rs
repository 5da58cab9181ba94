use async_trait::async_trait;
use sqlx::PgPool;

use super::{SessionRepository, StoreResult};
use crate::models::Session;

#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionStore {
    async fn create(&self, session: &Session) -> StoreResult<Session> {
        let created = sqlx::query_as::<_, Session>(
            "INSERT INTO session (token, user_id, expires_at) VALUES ($1, $2, $3)
             RETURNING token, user_id, expires_at",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn upsert(&self, session: &Session) -> StoreResult<Session> {
        let stored = sqlx::query_as::<_, Session>(
            "INSERT INTO session (token, user_id, expires_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
                 SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
             RETURNING token, user_id, expires_at",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, expires_at FROM session WHERE token = $1",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM session WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

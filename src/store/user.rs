use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreResult, UserRepository};
use crate::models::user::UserRecord;
use crate::models::User;

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserStore {
    async fn create(&self, user: &User) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"INSERT INTO "user" (id, login, password, role) VALUES ($1, $2, $3, $4)
               RETURNING id, login, password, role"#,
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, login, password, role FROM "user" WHERE login = $1"#,
        )
        .bind(login)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, login, password, role FROM "user" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }
}

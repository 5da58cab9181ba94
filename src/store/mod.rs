//! Data access.
//!
//! One trait per aggregate, implemented over PostgreSQL (`Pg*Store`) and over
//! process memory (`MemoryStore`). Driver errors are classified into
//! [`StoreError`] here and nowhere else.

pub mod memory;
pub mod pool;
pub mod session;
pub mod task;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewTask, Session, Task, TaskListQuery, TaskPatch, User};

pub use memory::MemoryStore;
pub use session::PgSessionStore;
pub use task::PgTaskStore;
pub use user::PgUserStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no rows in result set")]
    NotFound,

    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::ForeignKeyViolation
            }
            _ => StoreError::Database(error),
        }
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, owner: Uuid, task: &NewTask) -> StoreResult<Task>;

    async fn find_by_id(&self, id: i32) -> StoreResult<Task>;

    /// Tasks of `owner` selected by `query`. Paged variants return at most
    /// `PAGE_SIZE` rows, newest first.
    async fn list_by_owner(&self, owner: Uuid, query: TaskListQuery) -> StoreResult<Vec<Task>>;

    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    /// Overwrites only the fields present in `patch`.
    async fn update(&self, id: i32, patch: &TaskPatch) -> StoreResult<Task>;

    async fn set_done(&self, id: i32, done: bool) -> StoreResult<Task>;

    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> StoreResult<User>;

    async fn find_by_login(&self, login: &str) -> StoreResult<User>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> StoreResult<Session>;

    /// Replaces the row of `session.user_id`, inserting one if none exists.
    async fn upsert(&self, session: &Session) -> StoreResult<Session>;

    async fn find_by_token(&self, token: &str) -> StoreResult<Session>;

    /// Deleting an unknown token is not an error.
    async fn delete_by_token(&self, token: &str) -> StoreResult<()>;
}

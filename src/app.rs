//! Shared application state and the extractor configuration every `App`
//! registers alongside it.

use actix_web::{error, web, HttpRequest};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::CredentialHasher;
use crate::error::AppError;
use crate::services::{SessionService, TaskService, UserService};
use crate::store::{
    MemoryStore, PgSessionStore, PgTaskStore, PgUserStore, SessionRepository, TaskRepository,
    UserRepository,
};

/// Where the repositories keep their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    Postgres,
    Memory,
}

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    pub users: UserService,
    pub sessions: SessionService,
    pub storage: Storage,
}

impl AppState {
    pub fn new(
        storage: Storage,
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: CredentialHasher,
    ) -> Self {
        Self {
            tasks: TaskService::new(tasks),
            users: UserService::new(users.clone(), hasher),
            sessions: SessionService::new(sessions, users),
            storage,
        }
    }

    pub fn with_pool(pool: PgPool, hasher: CredentialHasher) -> Self {
        Self::new(
            Storage::Postgres,
            Arc::new(PgTaskStore::new(pool.clone())),
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgSessionStore::new(pool)),
            hasher,
        )
    }

    pub fn in_memory(hasher: CredentialHasher) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(Storage::Memory, store.clone(), store.clone(), store, hasher)
    }
}

/// Rejects undecodable JSON bodies with a uniform 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        log::debug!("Rejected request body: {}", err);
        AppError::BadRequest("body decoding error".into()).into()
    })
}

/// Rejects incomplete or malformed query strings with a uniform 400.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(
        |err: error::QueryPayloadError, _req: &HttpRequest| {
            log::debug!("Rejected query string: {}", err);
            AppError::BadRequest("query request not full".into()).into()
        },
    )
}

/// Same as [`query_config`] for path segments such as a non-numeric task id.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
        log::debug!("Rejected path: {}", err);
        AppError::BadRequest("invalid path parameter".into()).into()
    })
}

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::AppError;
use crate::models::{Role, Session};
use crate::store::{SessionRepository, StoreError, UserRepository};

/// Issues, refreshes, resolves and revokes session tokens.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    /// Starts the first session of `user_id`.
    pub async fn create_token(&self, user_id: Uuid) -> Result<Session, AppError> {
        let session = self
            .sessions
            .create(&Session::issue(user_id, Utc::now()))
            .await?;
        debug!("Session created for user {}", user_id);
        Ok(session)
    }

    /// Replaces the session of `user_id` with a new token and expiry.
    pub async fn update_token(&self, user_id: Uuid) -> Result<Session, AppError> {
        let session = self
            .sessions
            .upsert(&Session::issue(user_id, Utc::now()))
            .await?;
        debug!("Session refreshed for user {}", user_id);
        Ok(session)
    }

    pub async fn get_token(&self, token: &str) -> Result<Session, AppError> {
        match self.sessions.find_by_token(token).await {
            Ok(session) => Ok(session),
            Err(StoreError::NotFound) => Err(AppError::NotFound("Session not found".into())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete_by_token(token).await?;
        Ok(())
    }

    /// Resolves a live token into the caller's identity as of `now`.
    pub async fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AppError> {
        let session = match self.get_token(token).await {
            Ok(session) => session,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized("Session not found".into()))
            }
            Err(e) => return Err(e),
        };

        if session.is_expired_at(now) {
            warn!("Rejected expired session of user {}", session.user_id);
            return Err(AppError::Unauthorized("Session expired".into()));
        }

        let role = match self.users.find_by_id(session.user_id).await {
            Ok(user) => user.role,
            Err(StoreError::NotFound) => Role::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Identity {
            user_id: session.user_id,
            role,
        })
    }
}

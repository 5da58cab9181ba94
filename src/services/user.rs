use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{CredentialHasher, Credentials};
use crate::error::AppError;
use crate::models::user::is_login_valid;
use crate::models::{Role, User};
use crate::store::{StoreError, UserRepository};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: CredentialHasher) -> Self {
        Self { repo, hasher }
    }

    /// Creates a plain user. A taken login is a unique violation.
    pub async fn register(&self, credentials: &Credentials) -> Result<User, AppError> {
        if !is_login_valid(&credentials.login) {
            return Err(AppError::ValidationError("login does not match the pattern".into()));
        }
        let password_hash = self.hasher.hash(&credentials.password)?;

        let user = self
            .repo
            .create(&User {
                id: Uuid::new_v4(),
                login: credentials.login.clone(),
                password_hash,
                role: Role::User,
            })
            .await?;

        info!("User {} registered as {}", user.id, user.login);
        Ok(user)
    }

    /// Unknown logins and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AppError> {
        let user = match self.repo.find_by_login(&credentials.login).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                warn!("Login attempt for unknown user {}", credentials.login);
                return Err(AppError::Unauthorized("Invalid credentials".into()));
            }
            Err(e) => return Err(e.into()),
        };

        self.hasher.verify(&user.password_hash, &credentials.password)?;
        Ok(user)
    }
}

//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Repository and password failures are classified once at their own boundary
//! (`StoreError`, `PasswordError`) and converted into `AppError` here, so usecases
//! only add domain checks such as ownership or emptiness-as-not-found.
//!
//! `AppError` implements `actix_web::error::ResponseError`; every variant maps to a
//! fixed status code and a JSON body of the form `{"status": ..., "error": ...}`.
//! Storage and internal failures never expose their detail to the client: it is
//! logged and replaced by a fixed message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::password::PasswordError;
use crate::store::StoreError;

/// Message returned to clients for any 5xx error.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, unknown or expired session (HTTP 401).
    Unauthorized(String),
    /// Authenticated but not allowed, e.g. a non-owner mutation (HTTP 403).
    Forbidden(String),
    /// Malformed request body or query string (HTTP 400).
    BadRequest(String),
    /// No matching row, or a filter that matched nothing (HTTP 404).
    NotFound(String),
    /// A unique constraint rejected the write (HTTP 400).
    UniqueViolation,
    /// A foreign key constraint rejected the write (HTTP 400).
    ForeignKeyViolation,
    /// Input failed a validation rule (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Opaque persistence failure (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::UniqueViolation => write!(f, "Violation must be unique"),
            AppError::ForeignKeyViolation => write!(f, "Foreign Key Violation"),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    /// The human-readable string sent to the client for this error.
    fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::UniqueViolation => "Violation must be unique".to_string(),
            AppError::ForeignKeyViolation => "Foreign Key Violation".to_string(),
            AppError::ValidationError(msg) => format!("Provided data is not valid: {}", msg),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                INTERNAL_MESSAGE.to_string()
            }
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_)
            | AppError::UniqueViolation
            | AppError::ForeignKeyViolation => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({
            "status": status.canonical_reason().unwrap_or_default(),
            "error": self.public_message(),
        }))
    }
}

/// Classified repository errors pass through unchanged in meaning.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::NotFound => AppError::NotFound("No rows in result set".into()),
            StoreError::UniqueViolation => AppError::UniqueViolation,
            StoreError::ForeignKeyViolation => AppError::ForeignKeyViolation,
            StoreError::Database(e) => AppError::DatabaseError(e.to_string()),
        }
    }
}

/// Converts `sqlx::Error` into `AppError` through the repository classification.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        StoreError::from(error).into()
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<PasswordError> for AppError {
    fn from(error: PasswordError) -> AppError {
        match error {
            PasswordError::InvalidInput => {
                AppError::ValidationError("password does not meet the policy".into())
            }
            PasswordError::Mismatch => AppError::Unauthorized("Invalid credentials".into()),
            PasswordError::InvalidHash(msg) | PasswordError::Hash(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

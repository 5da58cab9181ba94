pub mod extractors;
pub mod middleware;
pub mod password;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::LOGIN_REGEX;

// Re-export necessary items
pub use extractors::Identity;
pub use middleware::SessionAuth;
pub use password::{CredentialHasher, PasswordError};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Payload of both the registration and the login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    /// Must match the login allow-list pattern.
    #[validate(regex(
        path = "LOGIN_REGEX",
        message = "Login must be 7-64 characters of letters, digits, '@', '.', '_' or '-'"
    ))]
    pub login: String,
    /// Must be between 8 and 128 characters long.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_credentials_validation() {
        let valid = Credentials {
            login: "newAccount".to_string(),
            password: "Test12414".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_login = Credentials {
            login: "bad login".to_string(),
            ..valid.clone()
        };
        assert!(bad_login.validate().is_err());

        let short_password = Credentials {
            password: "123".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }
}

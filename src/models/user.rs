use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

lazy_static! {
    /// Allow-listed login pattern: starts with a letter, digit or `@`, then
    /// 6 to 63 more characters from the same set plus `.`, `_` and `-`.
    pub static ref LOGIN_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z0-9@][a-zA-Z0-9@._-]{6,63}$").unwrap();
}

pub fn is_login_valid(login: &str) -> bool {
    LOGIN_REGEX.is_match(login)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Anything other than `admin`, including a missing role, is a plain user.
impl From<Option<&str>> for Role {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    /// Argon2 PHC string; never sent to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
}

/// Row shape of the `"user"` table.
#[derive(Debug, FromRow)]
pub(crate) struct UserRecord {
    pub id: Uuid,
    pub login: String,
    pub password: String,
    pub role: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            login: record.login,
            password_hash: record.password,
            role: Role::from(record.role.as_deref()),
        }
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifetime of a freshly issued or refreshed session.
pub const SESSION_TTL_HOURS: i64 = 1;

/// An opaque bearer token bound to one user until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A new random token for `user_id`, valid for [`SESSION_TTL_HOURS`] from `now`.
    pub fn issue(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The identified user as the authority reports it at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Cached proof of identity. Superseded on every successful login and
/// consulted read-only everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// `None` for an offline session validated against the credential cache.
    pub token: Option<String>,
    pub user: SessionUser,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(token: Option<String>, user: SessionUser, ttl_hours: i64) -> Self {
        let issued_at = Utc::now();
        Self {
            token,
            user,
            issued_at,
            expires_at: issued_at + Duration::hours(ttl_hours),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_offline(&self) -> bool {
        self.token.is_none()
    }
}

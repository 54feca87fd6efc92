//! User session model and DTOs.

use sqlx::FromRow;
use tratics_core::types::{DbId, Timestamp};

/// A user session row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserSession {
    /// A session grants access only while it is neither revoked nor expired.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// DTO for creating a new user session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn session(expires_in: Duration, revoked: bool) -> UserSession {
        let now = Utc::now();
        UserSession {
            id: 1,
            user_id: 1,
            refresh_token_hash: "hash".into(),
            user_agent: None,
            ip_address: None,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
            created_at: now,
        }
    }

    #[test]
    fn unexpired_unrevoked_session_is_active() {
        assert!(session(Duration::days(1), false).is_active_at(Utc::now()));
    }

    #[test]
    fn expired_session_is_inactive_even_if_not_revoked() {
        assert!(!session(Duration::seconds(-1), false).is_active_at(Utc::now()));
    }

    #[test]
    fn revoked_session_is_inactive_even_if_unexpired() {
        assert!(!session(Duration::days(1), true).is_active_at(Utc::now()));
    }
}

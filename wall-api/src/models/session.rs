use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};

use crate::schema::sessions;

#[derive(Queryable, Identifiable, Debug)]
pub struct Session {
    pub id: String, // Opaque session token (UUID)
    pub admin_id: i32,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub revoked: bool,
}

impl Session {
    /// A session is usable only while unrevoked and unexpired. Expiry is
    /// passive: nothing sweeps the table, this is checked at validation.
    pub fn is_usable(&self, now: NaiveDateTime) -> bool {
        !self.revoked && self.expires_at > now
    }
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession {
    pub id: String,
    pub admin_id: i32,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub revoked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session_at(expires_at: NaiveDateTime, revoked: bool) -> Session {
        Session {
            id: "token".to_string(),
            admin_id: 1,
            created_at: Utc::now().naive_utc(),
            expires_at,
            revoked,
        }
    }

    #[test]
    fn test_live_session_is_usable() {
        let now = Utc::now().naive_utc();
        assert!(session_at(now + Duration::hours(1), false).is_usable(now));
    }

    #[test]
    fn test_expired_session_is_not_usable() {
        let now = Utc::now().naive_utc();
        assert!(!session_at(now - Duration::hours(1), false).is_usable(now));
    }

    #[test]
    fn test_revoked_session_is_not_usable() {
        let now = Utc::now().naive_utc();
        assert!(!session_at(now + Duration::hours(1), true).is_usable(now));
    }
}

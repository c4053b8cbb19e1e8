//! Credential verification and session issuance.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::models::{AdminUser, NewSession, Session};
use crate::orm::admin_user::{get_admin_by_username, touch_last_login};

#[derive(Debug)]
pub enum LoginError {
    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable to callers.
    InvalidCredentials,
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for LoginError {
    fn from(e: diesel::result::Error) -> Self {
        LoginError::Db(e)
    }
}

/// Hashes a password using Argon2 with a random salt.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
}

/// Verifies a password against a stored Argon2 hash. A malformed stored
/// hash verifies as false rather than erroring; a row in that state is
/// unusable either way.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generates an opaque session token.
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Creates a session row for `admin_id` expiring `expiry_hours` from now.
pub fn create_session(
    conn: &mut SqliteConnection,
    admin_id: i32,
    expiry_hours: i64,
) -> Result<Session, diesel::result::Error> {
    use crate::schema::sessions::dsl as s;

    let now = Utc::now().naive_utc();
    let new_session = NewSession {
        id: generate_session_token(),
        admin_id,
        created_at: now,
        expires_at: now + Duration::hours(expiry_hours),
        revoked: false,
    };

    diesel::insert_into(s::sessions)
        .values(&new_session)
        .execute(conn)?;

    s::sessions
        .filter(s::id.eq(&new_session.id))
        .first::<Session>(conn)
}

/// Looks up a session by its token.
pub fn get_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<Session>, diesel::result::Error> {
    use crate::schema::sessions::dsl as s;
    s::sessions
        .filter(s::id.eq(token))
        .first::<Session>(conn)
        .optional()
}

/// Returns all sessions, newest first. Used by the admin CLI.
pub fn list_all_sessions(
    conn: &mut SqliteConnection,
) -> Result<Vec<Session>, diesel::result::Error> {
    use crate::schema::sessions::dsl as s;
    s::sessions.order(s::created_at.desc()).load::<Session>(conn)
}

/// Full login flow: verify credentials, record the login time, and issue
/// a fresh session.
///
/// `verify_password` runs even when the username is unknown so that the
/// response time does not reveal which usernames exist.
pub fn process_login(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
    expiry_hours: i64,
) -> Result<(AdminUser, Session), LoginError> {
    let admin = get_admin_by_username(conn, username)?;

    let verified = match &admin {
        Some(a) => verify_password(password, &a.password_hash),
        None => {
            // Burn a hash comparison against a throwaway hash.
            verify_password(password, &hash_password("timing-pad"));
            false
        }
    };

    let Some(admin) = admin.filter(|_| verified) else {
        return Err(LoginError::InvalidCredentials);
    };

    touch_last_login(conn, admin.id)?;
    let session = create_session(conn, admin.id, expiry_hours)?;
    Ok((admin, session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("Tr0ub4dor&3", &hash));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn test_session_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}

//! Session revocation.

use diesel::prelude::*;

/// Revokes a session by token. Revocation is terminal: a revoked session
/// never becomes usable again, even before its expiry. Returns the number
/// of rows that changed state (0 for unknown or already-revoked tokens).
pub fn revoke_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::sessions::dsl::*;
    diesel::update(sessions.filter(id.eq(token)).filter(revoked.eq(false)))
        .set(revoked.eq(true))
        .execute(conn)
}

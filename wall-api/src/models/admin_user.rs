use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use ts_rs::TS;

use crate::schema::admin_users;

/// An administrator account.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// authenticator. API responses use [`AdminUserPublic`] instead.
#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = admin_users)]
pub struct AdminUser {
    pub id: i32,
    pub username: String, // Will be unique
    pub password_hash: String,
    pub role: String,
    pub last_login: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = admin_users)]
pub struct NewAdminUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub last_login: Option<NaiveDateTime>,
}

/// The subset of [`AdminUser`] that is safe to return to clients.
#[derive(Serialize, Debug, TS)]
#[ts(export)]
pub struct AdminUserPublic {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<AdminUser> for AdminUserPublic {
    fn from(user: AdminUser) -> Self {
        AdminUserPublic {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

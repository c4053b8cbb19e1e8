//! Database operations for administrator accounts.

use chrono::Utc;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::models::{AdminUser, NewAdminUser};

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Inserts a new admin user and returns the stored row.
pub fn insert_admin(
    conn: &mut SqliteConnection,
    new_admin: NewAdminUser,
) -> Result<AdminUser, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;

    diesel::insert_into(admin_users)
        .values(&new_admin)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    admin_users
        .filter(id.eq(last_id as i32))
        .first::<AdminUser>(conn)
}

/// Gets a single admin by ID.
pub fn get_admin(
    conn: &mut SqliteConnection,
    admin_id: i32,
) -> Result<Option<AdminUser>, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    admin_users
        .filter(id.eq(admin_id))
        .first::<AdminUser>(conn)
        .optional()
}

/// Gets a single admin by username.
pub fn get_admin_by_username(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<AdminUser>, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    admin_users
        .filter(username.eq(name))
        .first::<AdminUser>(conn)
        .optional()
}

/// Returns all admins in ascending order by id.
pub fn list_all_admins(
    conn: &mut SqliteConnection,
) -> Result<Vec<AdminUser>, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    admin_users.order(id.asc()).load::<AdminUser>(conn)
}

pub fn count_admins(conn: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    admin_users.count().get_result(conn)
}

/// Records a successful login.
pub fn touch_last_login(
    conn: &mut SqliteConnection,
    admin_id: i32,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    diesel::update(admin_users.filter(id.eq(admin_id)))
        .set(last_login.eq(Some(Utc::now().naive_utc())))
        .execute(conn)
}

/// Replaces an admin's password hash.
pub fn update_password_hash(
    conn: &mut SqliteConnection,
    admin_id: i32,
    new_hash: &str,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    diesel::update(admin_users.filter(id.eq(admin_id)))
        .set(password_hash.eq(new_hash))
        .execute(conn)
}

/// Deletes an admin. Sessions cascade via the foreign key.
pub fn delete_admin(
    conn: &mut SqliteConnection,
    admin_id: i32,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::admin_users::dsl::*;
    diesel::delete(admin_users.filter(id.eq(admin_id))).execute(conn)
}

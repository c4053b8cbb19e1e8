use diesel::SqliteConnection;
use dotenvy::dotenv;
use rocket::Rocket;
use rocket::fairing::AdHoc;

use crate::models::NewAdminUser;
use crate::orm::DbConn;
use crate::orm::admin_user::{count_admins, insert_admin};
use crate::orm::login::hash_password;

/// Seeds a default admin account when the table is empty.
///
/// Credentials come from WALL_ADMIN_USERNAME / WALL_ADMIN_PASSWORD,
/// falling back to admin/admin with a loud warning.
pub fn admin_init_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Admin User Initialization", |rocket| async {
        dotenv().ok();

        let conn = match get_db_connection(&rocket).await {
            Some(conn) => conn,
            None => return Err(rocket),
        };

        match conn.run(create_admin_if_needed).await {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("[admin-init] FATAL: Admin user creation failed: {:?}", e);
                Err(rocket)
            }
        }
    })
}

async fn get_db_connection(rocket: &Rocket<rocket::Build>) -> Option<DbConn> {
    match DbConn::get_one(rocket).await {
        Some(conn) => Some(conn),
        None => {
            error!("[admin-init] ERROR: Could not get DB connection.");
            None
        }
    }
}

fn create_admin_if_needed(c: &mut SqliteConnection) -> Result<(), diesel::result::Error> {
    if count_admins(c)? > 0 {
        info!("[admin-init] Admin accounts already exist");
        return Ok(());
    }

    let username = get_admin_username();
    let password = get_admin_password();
    if password == "admin" {
        warn!("[admin-init] Using the default admin password; set WALL_ADMIN_PASSWORD");
    }

    insert_admin(
        c,
        NewAdminUser {
            username: username.clone(),
            password_hash: hash_password(&password),
            role: "admin".to_string(),
            last_login: None,
        },
    )?;
    info!("[admin-init] Created admin user: '{}'", username);
    Ok(())
}

fn get_admin_username() -> String {
    std::env::var("WALL_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string())
}

fn get_admin_password() -> String {
    std::env::var("WALL_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}

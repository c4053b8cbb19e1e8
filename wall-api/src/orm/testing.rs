use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::{Build, Rocket, fairing::AdHoc};
use rocket_sync_db_pools::diesel;

use super::db::{DbConn, run_pending_migrations, set_foreign_keys};
use crate::config::AppConfig;
use crate::extract::TextExtractor;
use crate::models::NewAdminUser;
use crate::orm::admin_user::insert_admin;
use crate::orm::login::hash_password;
use crate::rate_limit::RateLimiter;
use crate::services::Notifier;

/// Configures SQLite with performance-optimized settings for testing.
///
/// Sets `synchronous = OFF` and `journal_mode = OFF`. Faster but less
/// durable; only for tests.
///
/// # Panics
/// Panics if the PRAGMA commands fail to execute
fn set_sqlite_test_pragmas(conn: &mut diesel::SqliteConnection) {
    conn.batch_execute(
        r#"
        PRAGMA synchronous = OFF;
        PRAGMA journal_mode = OFF;
        "#,
    )
    .expect("Failed to set SQLite PRAGMAs");
}

fn set_sqlite_test_pragmas_fairing() -> AdHoc {
    AdHoc::on_ignite("Set SQLite Test Pragmas", |rocket| async {
        let conn = DbConn::get_one(&rocket)
            .await
            .expect("database connection for migration");
        conn.run(|c| {
            set_sqlite_test_pragmas(c);
        })
        .await;
        rocket
    })
}

/// Credentials for the admin account seeded into every test rocket.
pub const TEST_ADMIN_USERNAME: &str = "testadmin";
pub const TEST_ADMIN_PASSWORD: &str = "testpass";

/// Creates a Rocket fairing that seeds a known admin account for tests.
fn seed_test_admin_fairing() -> AdHoc {
    AdHoc::on_ignite("Seed Test Admin", |rocket| async {
        let conn = DbConn::get_one(&rocket)
            .await
            .expect("database connection for seeding");
        conn.run(|c| {
            insert_admin(
                c,
                NewAdminUser {
                    username: TEST_ADMIN_USERNAME.to_string(),
                    password_hash: hash_password(TEST_ADMIN_PASSWORD),
                    role: "admin".to_string(),
                    last_login: None,
                },
            )
            .expect("Failed to seed test admin");
        })
        .await;
        rocket
    })
}

/// Creates and configures a Rocket instance for testing with an in-memory
/// SQLite database.
///
/// The returned Rocket instance has:
/// - A unique in-memory SQLite database (shared-cache, so the pool's
///   connections all see the same data)
/// - Foreign keys enabled, testing pragmas set, all migrations run
/// - A seeded `testadmin` account
/// - Test configuration managed: reference intake policy, no external
///   recognition strategies, outbound services disabled
/// - All API routes mounted
pub fn test_rocket() -> Rocket<Build> {
    use uuid::Uuid;

    // Each test instance gets its own shared in-memory database.
    let unique_db_name = format!("file:wall_test_{}?mode=memory&cache=shared", Uuid::new_v4());

    let db_config: Map<_, Value> = map! {
        "url" => unique_db_name.into(),
        "pool_size" => 2.into(),
        "timeout" => 5.into(),
    };

    let figment = rocket::Config::figment().merge(("databases", map!["wall_db" => db_config]));

    let config = AppConfig::for_tests();
    let limiter = RateLimiter::new(config.rate_limit_quota, config.rate_limit_window_secs);
    let extractor = TextExtractor::from_config(&config);
    let notifier = Notifier::from_config(&config);

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(super::db::set_foreign_keys_fairing())
        .attach(set_sqlite_test_pragmas_fairing())
        .attach(super::db::run_migrations_fairing())
        .attach(seed_test_admin_fairing())
        .manage(config)
        .manage(limiter)
        .manage(extractor)
        .manage(notifier);
    crate::mount_api_routes(rocket)
}

/// Creates a synchronous in-memory SQLite database connection for unit
/// tests, with migrations run and foreign keys enabled.
///
/// Each call returns a new, independent in-memory database.
pub fn setup_test_db() -> SqliteConnection {
    use diesel::Connection;

    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Failed to create in-memory SQLite database");
    set_foreign_keys(&mut conn);
    run_pending_migrations(&mut conn);
    conn
}

#[macro_use]
extern crate rocket;

use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
    value::Map,
};
use rocket::request::Request;
use rocket::serde::json::{Json, Value, json};
use rocket::{Build, Rocket};

pub mod admin_init_fairing;
pub mod anonymize;
pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod orm;
pub mod rate_limit;
pub mod schema;
pub mod services;
pub mod session_guards;
pub mod validate;

pub use orm::DbConn;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

fn error_body(status: u16, message: &str, code: &str) -> Json<Value> {
    Json(json!({
        "success": false,
        "message": message,
        "errors": [],
        "code": code,
        "status": status,
    }))
}

#[catch(400)]
fn bad_request() -> Json<Value> {
    error_body(400, "Bad request", "VALIDATION_ERROR")
}

#[catch(401)]
fn unauthorized() -> Json<Value> {
    error_body(401, "Authentication required", "AUTH_ERROR")
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "success": false,
        "message": "Not Found",
        "errors": [req.uri().path().to_string()],
        "code": "NOT_FOUND",
        "status": 404,
    }))
}

#[catch(422)]
fn unprocessable() -> Json<Value> {
    error_body(422, "Request body could not be parsed", "VALIDATION_ERROR")
}

#[catch(429)]
fn too_many_requests() -> Json<Value> {
    error_body(
        429,
        "Rate limit exceeded. Please try again later.",
        "RATE_LIMIT_EXCEEDED",
    )
}

#[catch(500)]
fn internal_error() -> Json<Value> {
    error_body(500, "Internal server error", "INTERNAL_ERROR")
}

#[catch(default)]
fn default_catcher(status: rocket::http::Status, _req: &Request) -> Json<Value> {
    error_body(status.code, status.reason_lossy(), "ERROR")
}

pub fn mount_api_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api", api::routes())
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                unprocessable,
                too_many_requests,
                internal_error,
                default_catcher,
            ],
        )
}

fn cors_fairing() -> rocket_cors::Cors {
    rocket_cors::CorsOptions {
        allowed_origins: rocket_cors::AllowedOrigins::all(),
        allowed_headers: rocket_cors::AllowedHeaders::all(),
        allow_credentials: false,
        ..Default::default()
    }
    .to_cors()
    .expect("CORS configuration is static and valid")
}

fn log_rocket_info(rocket: &Rocket<Build>) {
    let figment = rocket.figment();

    if let Ok(address) = figment.extract_inner::<String>("address") {
        info!("Rocket is running at: {}", address);
    }
    if let Ok(port) = figment.extract_inner::<u16>("port") {
        info!("Rocket is listening on port: {}", port);
    }

    match figment.extract_inner::<Map<String, Value>>("databases.wall_db") {
        Ok(db_config) => {
            if let Some(Value::String(url)) = db_config.get("url") {
                info!("Database URL: {}", url);
            } else {
                warn!("Database URL not found in configuration");
            }
        }
        Err(e) => {
            warn!("Failed to extract database configuration: {}", e);
        }
    }
}

/// Assembles the production Rocket: database fairings, seed admin,
/// managed application state, CORS, and the API routes.
///
/// Note that this function doesn't get exercised by our tests. Tests set
/// up an in-memory rocket via `orm::testing::test_rocket`.
#[launch]
pub fn rocket() -> Rocket<Build> {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let figment = Figment::from(rocket::Config::default())
        .merge(Toml::file("Rocket.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(("databases.wall_db.url", database_url));

    let config = config::AppConfig::from_env();
    let limiter =
        rate_limit::RateLimiter::new(config.rate_limit_quota, config.rate_limit_window_secs);
    let extractor = extract::TextExtractor::from_config(&config);
    let notifier = services::Notifier::from_config(&config);

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(orm::set_foreign_keys_fairing())
        .attach(orm::run_migrations_fairing())
        .attach(admin_init_fairing::admin_init_fairing())
        .attach(cors_fairing())
        .manage(config)
        .manage(limiter)
        .manage(extractor)
        .manage(notifier);

    log_rocket_info(&rocket);

    mount_api_routes(rocket)
}

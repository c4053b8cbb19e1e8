//! HTTP endpoints, grouped per concern. Each submodule exposes a
//! `routes()` collector; [`routes`] merges them for mounting under `/api`.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod status;
pub mod submissions;

use rocket::Route;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(status::routes());
    routes.extend(submissions::routes());
    routes.extend(auth::routes());
    routes.extend(admin::routes());
    routes.extend(dashboard::routes());
    routes
}

//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/students` → self registration
//! - `/teacher` → teacher login
//! - `/sessions` → start, inspect and close attendance sessions
//! - `/attendance` → student marks
//! - `/admin` → history, CSV export and the student roster

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;

use crate::auth::middleware::log_request;
use crate::routes::{
    admin::admin_routes, attendance::attendance_routes, health::health_routes,
    sessions::sessions_routes, students::students_routes, teacher::teacher_routes,
};
use crate::state::AppState;

pub mod admin;
pub mod attendance;
pub mod common;
pub mod health;
pub mod sessions;
pub mod students;
pub mod teacher;

/// All `/api` routes with their state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/students", students_routes())
        .nest("/teacher", teacher_routes())
        .nest("/sessions", sessions_routes())
        .nest("/attendance", attendance_routes())
        .nest("/admin", admin_routes())
        .with_state(app_state)
}

/// The full application: `/api` routes plus request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors)
}

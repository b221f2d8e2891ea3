//! `/admin` route group. Every handler takes `?teacher_id=` and defers to the
//! configured authorization policy.
//!
//! - `GET /admin/history?department=&date=` → `get_history`
//! - `GET /admin/export?department=&date=` → `export_history`
//! - `GET /admin/students` → `list_students`
//! - `DELETE /admin/students/{student_id}` → `delete_student`

pub mod delete;
pub mod get;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;
use delete::delete_student;
use get::{export_history, get_history, list_students};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_history))
        .route("/export", get(export_history))
        .route("/students", get(list_students))
        .route("/students/{student_id}", delete(delete_student))
}

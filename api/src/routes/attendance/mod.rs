//! `/attendance` route group.
//!
//! - `POST /attendance/mark` → `mark`

pub mod post;

use axum::{Router, routing::post};

use crate::state::AppState;
use post::mark;

pub fn attendance_routes() -> Router<AppState> {
    Router::new().route("/mark", post(mark))
}

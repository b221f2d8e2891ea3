//! `/students` route group.
//!
//! - `POST /students/register` → `register`

pub mod post;

use axum::{Router, routing::post};

use crate::state::AppState;
use post::register;

pub fn students_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

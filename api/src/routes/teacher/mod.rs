//! `/teacher` route group.
//!
//! - `POST /teacher/login` → `login`

pub mod post;

use axum::{Router, routing::post};

use crate::state::AppState;
use post::login;

pub fn teacher_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

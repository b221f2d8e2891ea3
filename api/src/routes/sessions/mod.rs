//! `/sessions` route group.
//!
//! - `POST /sessions/start` → `start_session`
//! - `GET /sessions/active?department=` → `get_active_session`
//! - `POST /sessions/{session_id}/close` → `close_session`

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use get::get_active_session;
use post::{close_session, start_session};

pub fn sessions_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_session))
        .route("/active", get(get_active_session))
        .route("/{session_id}/close", post(close_session))
}

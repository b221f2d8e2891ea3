//! Request-level plumbing that is not tied to a route group.
//!
//! Teacher identity is not carried in a token: gated routes receive an optional
//! `teacher_id` and hand it to the configured `AuthorizationPolicy`.

pub mod middleware;

use serde::Deserialize;

/// `?teacher_id=...` on the admin routes.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherQuery {
    pub teacher_id: Option<String>,
}

//! Authorization policy applied to every teacher-gated operation (session
//! start and close, history, export, roster, deletion). Selected by
//! `AUTH_POLICY`:
//!
//! - `enforced`: the caller must supply the id of an existing teacher.
//! - `open`: any caller is accepted; a supplied id is resolved when it matches
//!   a teacher, and ignored otherwise.

use db::models::teacher;
use sea_orm::DatabaseConnection;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AuthMode {
    Enforced,
    Open,
}

/// Who is performing a gated operation, as far as the policy could tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Teacher { id: String, username: String },
    Unverified,
}

impl Actor {
    pub fn teacher_id(&self) -> Option<&str> {
        match self {
            Actor::Teacher { id, .. } => Some(id),
            Actor::Unverified => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    mode: AuthMode,
}

impl AuthorizationPolicy {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    pub fn enforced() -> Self {
        Self::new(AuthMode::Enforced)
    }

    pub fn open() -> Self {
        Self::new(AuthMode::Open)
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Parses an `AUTH_POLICY` value (`enforced` | `open`, case-insensitive).
    pub fn from_config_value(value: &str) -> ServiceResult<Self> {
        AuthMode::from_str(value.trim())
            .map(Self::new)
            .map_err(|_| {
                ServiceError::Validation(format!(
                    "unknown authorization policy '{value}' (expected 'enforced' or 'open')"
                ))
            })
    }

    /// Resolves `teacher_id` against the store according to the policy.
    pub async fn authorize(
        &self,
        db: &DatabaseConnection,
        teacher_id: Option<&str>,
    ) -> ServiceResult<Actor> {
        let teacher_id = teacher_id.map(str::trim).filter(|id| !id.is_empty());

        let found = match teacher_id {
            Some(id) => teacher::Model::find_by_id(db, id).await?,
            None => None,
        };

        match (self.mode, found) {
            (_, Some(t)) => Ok(Actor::Teacher {
                id: t.id,
                username: t.username,
            }),
            (AuthMode::Open, None) => Ok(Actor::Unverified),
            (AuthMode::Enforced, None) => {
                tracing::debug!(teacher_id = ?teacher_id, "Rejected unauthorized teacher id");
                Err(ServiceError::Unauthorized("unauthorized".into()))
            }
        }
    }
}

use db::{is_unique_violation, models::teacher};
use sea_orm::DatabaseConnection;

use crate::credentials::CredentialVerifier;
use crate::error::{ServiceError, ServiceResult};

pub use db::models::teacher::Model as Teacher;

const INVALID_CREDENTIALS: &str = "invalid credentials";

pub struct TeacherService;

impl TeacherService {
    pub async fn create(
        db: &DatabaseConnection,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> ServiceResult<Teacher> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(
                "username and password are required".into(),
            ));
        }

        let credential = verifier.hash(password)?;
        match teacher::Model::create(db, username, &credential).await {
            Ok(t) => Ok(t),
            Err(e) if is_unique_violation(&e) => {
                Err(ServiceError::Conflict("username already taken".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a username/password pair. Unknown usernames and wrong passwords
    /// produce the same error.
    pub async fn login(
        db: &DatabaseConnection,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> ServiceResult<Teacher> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        match teacher::Model::find_by_username(db, username).await? {
            Some(t) if verifier.verify(password, &t.credential) => {
                tracing::info!(teacher_id = %t.id, username = %t.username, "Teacher logged in");
                Ok(t)
            }
            _ => {
                tracing::warn!(username = %username, "Failed teacher login");
                Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }

    /// Seeds the default teacher when, and only when, the teachers table is
    /// empty. Returns the created row, or `None` if nothing was seeded.
    pub async fn ensure_default_teacher(
        db: &DatabaseConnection,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> ServiceResult<Option<Teacher>> {
        if teacher::Model::count(db).await? > 0 {
            return Ok(None);
        }

        match Self::create(db, verifier, username, password).await {
            Ok(t) => {
                tracing::info!(teacher_id = %t.id, username = %t.username, "Seeded default teacher");
                Ok(Some(t))
            }
            // another process seeded it between the count and the insert
            Err(ServiceError::Conflict(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

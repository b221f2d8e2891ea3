//! Pluggable credential schemes for teacher accounts.
//!
//! The stored `credential` column is opaque to the rest of the crate; only the
//! configured [`CredentialVerifier`] knows how to produce and check it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};

pub trait CredentialVerifier: Send + Sync {
    /// Name used in `CREDENTIAL_SCHEME`.
    fn scheme(&self) -> &'static str;

    /// Turns a cleartext password into the value persisted for the teacher.
    fn hash(&self, password: &str) -> ServiceResult<String>;

    /// Checks `candidate` against a value previously produced by [`hash`](Self::hash).
    fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Argon2id with a random salt, stored as a PHC string.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn scheme(&self) -> &'static str {
        "argon2"
    }

    fn hash(&self, password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, candidate: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Cleartext comparison. Only for deployments that already store cleartext.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn scheme(&self) -> &'static str {
        "plaintext"
    }

    fn hash(&self, password: &str) -> ServiceResult<String> {
        Ok(password.to_owned())
    }

    fn verify(&self, candidate: &str, stored: &str) -> bool {
        candidate == stored
    }
}

/// Resolves a `CREDENTIAL_SCHEME` value to a verifier.
pub fn verifier_for(scheme: &str) -> ServiceResult<Arc<dyn CredentialVerifier>> {
    match scheme.trim().to_ascii_lowercase().as_str() {
        "argon2" => Ok(Arc::new(Argon2Verifier)),
        "plaintext" | "plain" => Ok(Arc::new(PlaintextVerifier)),
        other => Err(ServiceError::Validation(format!(
            "unknown credential scheme '{other}' (expected 'argon2' or 'plaintext')"
        ))),
    }
}

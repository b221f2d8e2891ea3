use sea_orm::DatabaseConnection;
use services::{
    ServiceResult,
    authorization::AuthorizationPolicy,
    credentials::{CredentialVerifier, verifier_for},
};
use std::sync::Arc;
use util::config;

/// Shared handler state: the store plus the two pluggable capabilities.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    policy: AuthorizationPolicy,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        policy: AuthorizationPolicy,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            db,
            policy,
            verifier,
        }
    }

    /// Builds the state from `AUTH_POLICY` and `CREDENTIAL_SCHEME`.
    pub fn from_config(db: DatabaseConnection) -> ServiceResult<Self> {
        let policy = AuthorizationPolicy::from_config_value(&config::auth_policy())?;
        let verifier = verifier_for(&config::credential_scheme())?;
        Ok(Self::new(db, policy, verifier))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }
}

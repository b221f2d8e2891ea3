#[cfg(test)]
mod tests {
    use api::state::AppState;
    use db::test_utils::setup_test_db;
    use serial_test::serial;
    use services::authorization::AuthMode;
    use util::config::AppConfig;

    #[tokio::test]
    #[serial]
    async fn state_follows_configuration() {
        AppConfig::set_auth_policy("open");
        AppConfig::set_credential_scheme("plaintext");

        let state = AppState::from_config(setup_test_db().await).unwrap();
        assert_eq!(state.policy().mode(), AuthMode::Open);
        assert_eq!(state.verifier().scheme(), "plaintext");

        AppConfig::reset();
    }

    #[tokio::test]
    #[serial]
    async fn unknown_scheme_is_rejected() {
        AppConfig::set_auth_policy("enforced");
        AppConfig::set_credential_scheme("rot13");

        assert!(AppState::from_config(setup_test_db().await).is_err());

        AppConfig::reset();
    }
}

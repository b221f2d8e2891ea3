//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables (and `.env`).
//! It provides thread-safe access and mutation for testing or overrides.
//!
//! The free functions at the bottom of this module (`config::host()`,
//! `config::sweep_interval_seconds()`, ...) are the usual way to read a value.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub sweep_interval_seconds: u64,
    pub auth_policy: String,
    pub credential_scheme: String,
    pub default_teacher_username: String,
    pub default_teacher_password: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

/// Parses `key` if present, falling back to `default` when the variable is
/// missing or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "attendance-tracker"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "true") == "true",
            database_path: var_or("DATABASE_PATH", "data/attendance.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            sweep_interval_seconds: parsed_or("SWEEP_INTERVAL_SECONDS", 60u64).max(1),
            auth_policy: var_or("AUTH_POLICY", "enforced"),
            credential_scheme: var_or("CREDENTIAL_SCHEME", "argon2"),
            default_teacher_username: var_or("DEFAULT_TEACHER_USERNAME", "admin"),
            default_teacher_password: var_or("DEFAULT_TEACHER_PASSWORD", "admin123"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_sweep_interval_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.sweep_interval_seconds = value.max(1));
    }

    pub fn set_auth_policy(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.auth_policy = value.into());
    }

    pub fn set_credential_scheme(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.credential_scheme = value.into());
    }

    pub fn set_default_teacher(username: impl Into<String>, password: impl Into<String>) {
        AppConfig::set_field(|cfg| {
            cfg.default_teacher_username = username.into();
            cfg.default_teacher_password = password.into();
        });
    }
}

// --- Free-function accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

/// True when `DATABASE_PATH` holds a full `sqlite:` DSN rather than a file path.
pub fn is_database_dsn(value: &str) -> bool {
    value.starts_with("sqlite:")
}

/// Connection URL for a `DATABASE_PATH` value. A DSN is used as-is; a file
/// path is opened in read-write-create mode.
pub fn sqlite_url(value: &str) -> String {
    if is_database_dsn(value) {
        value.to_owned()
    } else {
        format!("sqlite://{value}?mode=rwc")
    }
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn sweep_interval_seconds() -> u64 {
    AppConfig::global().sweep_interval_seconds
}

pub fn auth_policy() -> String {
    AppConfig::global().auth_policy.clone()
}

pub fn credential_scheme() -> String {
    AppConfig::global().credential_scheme.clone()
}

pub fn default_teacher_username() -> String {
    AppConfig::global().default_teacher_username.clone()
}

pub fn default_teacher_password() -> String {
    AppConfig::global().default_teacher_password.clone()
}

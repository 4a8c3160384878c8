//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

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
    pub db_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub github_token: String,
    pub github_owner: String,
    pub github_repo: String,
    pub github_branch: String,
    pub github_api_url: String,
    pub github_web_url: String,
    pub github_raw_url: String,
    pub repo_root_folder: String,
    pub default_extension: String,
    pub remote_timeout_secs: u64,
    pub notify_timeout_secs: u64,
    pub gmail_username: String,
    pub gmail_app_password: String,
    pub email_from_name: String,
    pub cors_origins: Vec<String>,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

/// Reads and parses a variable, falling back to `default` when it is unset.
///
/// # Panics
/// Panics when the variable is set but cannot be parsed, so that a typo in the
/// environment stops the server at startup instead of silently using a default.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: {raw:?}")),
        Err(_) => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. It panics
    /// if a variable is present but improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "code-portal"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/dev.db"),
            db_timeout_secs: parse_or("DB_TIMEOUT_SECS", 5),
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 60),
            github_token: env::var("GITHUB_TOKEN").unwrap_or_default(),
            github_owner: env::var("GITHUB_OWNER").unwrap_or_default(),
            github_repo: env::var("GITHUB_REPO").unwrap_or_default(),
            github_branch: var_or("GITHUB_BRANCH", "main"),
            github_api_url: var_or("GITHUB_API_URL", "https://api.github.com"),
            github_web_url: var_or("GITHUB_WEB_URL", "https://github.com"),
            github_raw_url: var_or("GITHUB_RAW_URL", "https://raw.githubusercontent.com"),
            repo_root_folder: var_or("REPO_ROOT_FOLDER", "CS"),
            default_extension: var_or("DEFAULT_EXTENSION", ".py"),
            remote_timeout_secs: parse_or("REMOTE_TIMEOUT_SECS", 10),
            notify_timeout_secs: parse_or("NOTIFY_TIMEOUT_SECS", 10),
            gmail_username: env::var("GMAIL_USERNAME").unwrap_or_default(),
            gmail_app_password: env::var("GMAIL_APP_PASSWORD").unwrap_or_default(),
            email_from_name: var_or("EMAIL_FROM_NAME", "Code Portal"),
            cors_origins: split_list(&env::var("CORS_ORIGINS").unwrap_or_default()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Whether SMTP credentials are present.
    pub fn email_enabled(&self) -> bool {
        !self.gmail_username.is_empty() && !self.gmail_app_password.is_empty()
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

    // Test overrides.

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn split_list_drops_blanks_and_trims() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    #[serial]
    fn parse_or_uses_default_when_unset() {
        unsafe {
            env::remove_var("CODE_PORTAL_TEST_PORT");
        }
        assert_eq!(parse_or("CODE_PORTAL_TEST_PORT", 4000u16), 4000);
    }

    #[test]
    #[serial]
    fn parse_or_reads_value() {
        unsafe {
            env::set_var("CODE_PORTAL_TEST_PORT", " 8081 ");
        }
        assert_eq!(parse_or("CODE_PORTAL_TEST_PORT", 4000u16), 8081);
        unsafe {
            env::remove_var("CODE_PORTAL_TEST_PORT");
        }
    }

    #[test]
    #[serial]
    #[should_panic(expected = "CODE_PORTAL_TEST_BAD has an invalid value")]
    fn parse_or_panics_on_garbage() {
        unsafe {
            env::set_var("CODE_PORTAL_TEST_BAD", "not-a-number");
        }
        let _: u64 = parse_or("CODE_PORTAL_TEST_BAD", 1);
    }

    #[test]
    fn email_enabled_requires_both_credentials() {
        let mut cfg = AppConfig::from_env();
        cfg.gmail_username = "portal@example.com".into();
        cfg.gmail_app_password = String::new();
        assert!(!cfg.email_enabled());
        cfg.gmail_app_password = "secret".into();
        assert!(cfg.email_enabled());
    }
}

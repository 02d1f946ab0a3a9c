//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Every credential has a fallback so a development checkout runs without a `.env`
//! file. [`AppConfig::validate`] refuses those fallbacks when `APP_ENV=production`.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};
use thiserror::Error;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_MEMBER_PASSWORD: &str = "welcome123";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Indian Standard Time, UTC+05:30.
pub const DEFAULT_CIVIL_OFFSET_MINUTES: i32 = 330;
/// Longest session a token may be issued for: one year.
pub const MAX_JWT_DURATION_MINUTES: u64 = 366 * 24 * 60;

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
    pub app_url: String,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub admin_email: String,
    pub admin_password: String,
    pub default_member_password: String,
    pub gmail_username: String,
    pub gmail_app_password: String,
    pub email_from_name: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub civil_offset_minutes: i32,
}

/// A configuration value that is unacceptable for the current environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is still set to its built-in default")]
    InsecureDefault(&'static str),

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("CIVIL_OFFSET_MINUTES must be within +/-1439, got {0}")]
    InvalidOffset(i32),

    #[error("JWT_DURATION_MINUTES must be between 1 and {MAX_JWT_DURATION_MINUTES}, got {0}")]
    InvalidJwtDuration(u64),
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "club-attendance"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/club.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 3000),
            app_url: var_or("APP_URL", DEFAULT_APP_URL)
                .trim_end_matches('/')
                .to_string(),
            jwt_secret: var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 7 * 24 * 60),
            admin_email: var_or("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            admin_password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            default_member_password: var_or("DEFAULT_MEMBER_PASSWORD", DEFAULT_MEMBER_PASSWORD),
            gmail_username: env::var("GMAIL_USERNAME").unwrap_or_default(),
            gmail_app_password: env::var("GMAIL_APP_PASSWORD").unwrap_or_default(),
            email_from_name: var_or("EMAIL_FROM_NAME", "Training & Placement Cell"),
            smtp_host: var_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: parse_or("SMTP_PORT", 587),
            civil_offset_minutes: parse_or("CIVIL_OFFSET_MINUTES", DEFAULT_CIVIL_OFFSET_MINUTES),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
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
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn mail_configured(&self) -> bool {
        !self.gmail_username.is_empty() && !self.gmail_app_password.is_empty()
    }

    /// Lists every setting that would be unsafe to run with in production.
    pub fn findings(&self) -> Vec<ConfigError> {
        let mut findings = Vec::new();

        if self.jwt_secret.trim().is_empty() {
            findings.push(ConfigError::Missing("JWT_SECRET"));
        } else if self.jwt_secret == DEFAULT_JWT_SECRET {
            findings.push(ConfigError::InsecureDefault("JWT_SECRET"));
        }

        if self.admin_password.trim().is_empty() {
            findings.push(ConfigError::Missing("ADMIN_PASSWORD"));
        } else if self.admin_password == DEFAULT_ADMIN_PASSWORD {
            findings.push(ConfigError::InsecureDefault("ADMIN_PASSWORD"));
        }

        if self.default_member_password == DEFAULT_MEMBER_PASSWORD {
            findings.push(ConfigError::InsecureDefault("DEFAULT_MEMBER_PASSWORD"));
        }

        if self.gmail_username.is_empty() {
            findings.push(ConfigError::Missing("GMAIL_USERNAME"));
        }
        if self.gmail_app_password.is_empty() {
            findings.push(ConfigError::Missing("GMAIL_APP_PASSWORD"));
        }

        if self.civil_offset_minutes.abs() >= 24 * 60 {
            findings.push(ConfigError::InvalidOffset(self.civil_offset_minutes));
        }

        if !(1..=MAX_JWT_DURATION_MINUTES).contains(&self.jwt_duration_minutes) {
            findings.push(ConfigError::InvalidJwtDuration(self.jwt_duration_minutes));
        }

        findings
    }

    /// Startup check.
    ///
    /// In production the first finding is returned as an error and the caller is
    /// expected to abort. Elsewhere each finding is logged as a warning, except an
    /// out-of-range civil offset or session length, which is always fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for finding in self.findings() {
            let fatal = matches!(
                finding,
                ConfigError::InvalidOffset(_) | ConfigError::InvalidJwtDuration(_)
            );
            if self.is_production() || fatal {
                return Err(finding);
            }
            tracing::warn!(env = %self.env, "Configuration: {finding}");
        }
        Ok(())
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
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

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_app_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.app_url = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_admin_email(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.admin_email = value.into());
    }

    pub fn set_admin_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.admin_password = value.into());
    }

    pub fn set_default_member_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.default_member_password = value.into());
    }

    pub fn set_gmail_username(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gmail_username = value.into());
    }

    pub fn set_gmail_app_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gmail_app_password = value.into());
    }

    pub fn set_civil_offset_minutes(value: i32) {
        AppConfig::set_field(|cfg| cfg.civil_offset_minutes = value);
    }
}

// --- Free accessors ---

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

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn app_url() -> String {
    AppConfig::global().app_url.clone()
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn admin_email() -> String {
    AppConfig::global().admin_email.clone()
}

pub fn admin_password() -> String {
    AppConfig::global().admin_password.clone()
}

pub fn default_member_password() -> String {
    AppConfig::global().default_member_password.clone()
}

pub fn gmail_username() -> String {
    AppConfig::global().gmail_username.clone()
}

pub fn gmail_app_password() -> String {
    AppConfig::global().gmail_app_password.clone()
}

pub fn email_from_name() -> String {
    AppConfig::global().email_from_name.clone()
}

pub fn smtp_host() -> String {
    AppConfig::global().smtp_host.clone()
}

pub fn smtp_port() -> u16 {
    AppConfig::global().smtp_port
}

pub fn civil_offset_minutes() -> i32 {
    AppConfig::global().civil_offset_minutes
}

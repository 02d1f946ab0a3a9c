pub mod attendance_service;
pub mod credentials;
pub mod error;
pub mod event_service;
pub mod notification;
pub mod user_service;

pub use error::AppError;

use util::config::AppConfig;

/// The slice of configuration the domain operations depend on.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL baked into every QR code, without a trailing slash.
    pub app_url: String,
    pub civil_offset_minutes: i32,
    pub default_member_password: String,
    pub email_from_name: String,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            app_url: config.app_url.trim_end_matches('/').to_string(),
            civil_offset_minutes: config.civil_offset_minutes,
            default_member_password: config.default_member_password.clone(),
            email_from_name: config.email_from_name.clone(),
        }
    }

    /// The exact string stored in `users.qr_code` for `token`.
    pub fn scan_url(&self, token: &str) -> String {
        format!("{}/scan/{}", self.app_url, token)
    }
}

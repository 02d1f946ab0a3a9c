use crate::config::AppConfig;

pub const TEST_JWT_SECRET: &str = "test-secret-do-not-ship";
pub const TEST_APP_URL: &str = "https://club.test";

/// Pins the global configuration to values tests can assert against.
///
/// Mail credentials are cleared so nothing ever reaches a real relay.
pub fn configure_test_env() {
    AppConfig::set_env("test");
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    AppConfig::set_jwt_duration_minutes(7 * 24 * 60);
    AppConfig::set_app_url(TEST_APP_URL);
    AppConfig::set_civil_offset_minutes(crate::config::DEFAULT_CIVIL_OFFSET_MINUTES);
    AppConfig::set_gmail_username("");
    AppConfig::set_gmail_app_password("");
}

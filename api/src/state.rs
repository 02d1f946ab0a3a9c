use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey};
use sea_orm::DatabaseConnection;
use services::Settings;
use services::notification::{Mailer, Notifier};
use std::sync::Arc;
use util::config::{AppConfig, MAX_JWT_DURATION_MINUTES};

/// Source of "now" for attendance marking. Tests swap it to step across civil days.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Everything a handler needs, loaded once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    notifier: Notifier,
    settings: Arc<Settings>,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
    jwt_duration_minutes: i64,
    secure_cookie: bool,
    clock: Clock,
}

/// Session length in minutes, clamped so token and cookie expiry arithmetic
/// cannot overflow even when startup validation was skipped.
fn session_minutes(configured: u64) -> i64 {
    configured.clamp(1, MAX_JWT_DURATION_MINUTES) as i64
}

impl AppState {
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>, config: &AppConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            db,
            notifier: Notifier::new(mailer),
            settings: Arc::new(Settings::from_config(config)),
            jwt_encoding_key: EncodingKey::from_secret(secret),
            jwt_decoding_key: DecodingKey::from_secret(secret),
            jwt_duration_minutes: session_minutes(config.jwt_duration_minutes),
            secure_cookie: config.is_production(),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_decoding_key
    }

    pub fn jwt_duration_minutes(&self) -> i64 {
        self.jwt_duration_minutes
    }

    /// Whether the session cookie carries `Secure`; only set in production.
    pub fn secure_cookie(&self) -> bool {
        self.secure_cookie
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

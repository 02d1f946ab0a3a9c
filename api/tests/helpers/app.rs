use api::{routes::routes, state::AppState};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use db::models::user::{Model as UserModel, NewUser, Role};
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::AppError;
use services::credentials::hash_password;
use services::notification::{Mailer, OutgoingEmail};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use util::config::AppConfig;
use util::test_helpers::configure_test_env;

/// Captures outgoing mail instead of talking to a relay.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail_for: Option<String>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        if self.fail_for.as_deref() == Some(email.to.as_str()) {
            return Err(AppError::ExternalService("mailbox unavailable".into()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

impl RecordingMailer {
    /// Spawned sends land asynchronously; poll briefly.
    pub async fn wait_for(&self, count: usize) -> Vec<String> {
        for _ in 0..50 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.sent.lock().unwrap().iter().map(|e| e.subject.clone()).collect()
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    elapsed_seconds: Arc<AtomicI64>,
}

/// 2024-05-01 10:00 IST.
pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 4, 30, 0).unwrap()
}

pub async fn make_test_app() -> TestApp {
    make_test_app_with_mailer(RecordingMailer::default()).await
}

pub async fn make_test_app_with_mailer(mailer: RecordingMailer) -> TestApp {
    configure_test_env();
    let config = AppConfig::global().clone();
    let db = setup_test_db().await;
    let mailer = Arc::new(mailer);

    let elapsed_seconds = Arc::new(AtomicI64::new(0));
    let clock_offset = elapsed_seconds.clone();
    let state = AppState::new(db, mailer.clone(), &config).with_clock(Arc::new(move || {
        start_instant() + Duration::seconds(clock_offset.load(Ordering::SeqCst))
    }));

    let router = Router::new()
        .nest("/api", routes(state.clone()))
        .with_state(state.clone());

    TestApp {
        router,
        state,
        mailer,
        elapsed_seconds,
    }
}

impl TestApp {
    pub fn advance(&self, by: Duration) {
        self.elapsed_seconds.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.send(method, uri, token, body).await;
        let status = response.status();
        (status, get_json_body(response).await)
    }

    /// Inserts a record with a known password and the given role.
    pub async fn seed_user(&self, email: &str, roll: &str, role: Role) -> UserModel {
        UserModel::create(
            self.state.db(),
            NewUser {
                name: format!("Seeded {roll}"),
                email: email.into(),
                password_hash: Some(hash_password("password123").unwrap()),
                roll_number: roll.into(),
                role: Some(role),
                qr_code: self.state.settings().scan_url(&format!("seed{roll}")),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, json) = self
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["data"]["token"].as_str().unwrap().to_string()
    }

    /// Seeds a user with `role` and returns a session token for it.
    pub async fn token_for(&self, role: Role) -> String {
        let email = format!("{role}@club.test");
        let roll = format!("{}-ROLL", role.to_string().to_uppercase());
        self.seed_user(&email, &roll, role).await;
        self.login(&email, "password123").await
    }
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

//! Minimal API client. The session cookie set at login is kept by the cookie
//! store and sent with every later request.

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// The server's `{ success, data, message }` envelope, tolerant of non-JSON bodies.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub status: StatusCode,
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn parse(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self {
                status,
                success: value["success"].as_bool().unwrap_or(false),
                message: value["message"].as_str().unwrap_or_default().to_string(),
                data: value["data"].clone(),
            },
            Err(_) => Self {
                status,
                success: false,
                message: if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                },
                data: Value::Null,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TodaySummary {
    pub date: String,
    pub total: u64,
    pub present: u64,
    pub rate: f64,
}

pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(15))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope> {
        let response = request.send().await.context("contacting server")?;
        let status = response.status();
        let body = response.text().await.context("reading response body")?;
        Ok(Envelope::parse(status, &body))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let reply = self
            .send(
                self.http
                    .post(self.url("/auth/login"))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        if !reply.success {
            bail!("login failed ({}): {}", reply.status, reply.message);
        }
        log::info!("Logged in as {email}");
        Ok(())
    }

    /// Submits one identifier. Business failures (unknown code, wrong role) come
    /// back as an unsuccessful envelope, not an `Err`.
    pub async fn mark(&self, identifier: &str) -> Result<Envelope> {
        self.send(
            self.http
                .post(self.url("/attendance/mark"))
                .json(&json!({ "identifier": identifier })),
        )
        .await
    }

    pub async fn today(&self) -> Result<TodaySummary> {
        let reply = self.send(self.http.get(self.url("/attendance/today"))).await?;
        if !reply.success {
            bail!("summary unavailable ({}): {}", reply.status, reply.message);
        }
        serde_json::from_value(reply.data).context("decoding attendance summary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope() {
        let body = r#"{"success":true,"data":{"user":{"name":"Asha"}},"message":"Attendance marked successfully"}"#;
        let reply = Envelope::parse(StatusCode::OK, body);
        assert!(reply.success);
        assert_eq!(reply.message, "Attendance marked successfully");
        assert_eq!(reply.data["user"]["name"], "Asha");
    }

    #[test]
    fn plain_text_rejection_becomes_failed_envelope() {
        let reply = Envelope::parse(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Failed to deserialize the JSON body",
        );
        assert!(!reply.success);
        assert_eq!(reply.message, "Failed to deserialize the JSON body");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let reply = Envelope::parse(StatusCode::BAD_GATEWAY, "");
        assert_eq!(reply.message, "502 Bad Gateway");
    }

    #[test]
    fn builds_api_urls_without_double_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/attendance/mark"), "http://localhost:3000/api/attendance/mark");
    }
}

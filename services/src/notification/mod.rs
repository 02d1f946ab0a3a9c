//! Transactional email.
//!
//! Services build an [`OutgoingEmail`] from a template and hand it to the
//! [`Notifier`]. Delivery is fire-and-forget: it runs on a spawned task, failures
//! are logged, nothing is retried, and the triggering operation never waits on it.

pub mod templates;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Transport seam. The API crate provides the SMTP implementation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}

/// Used when no relay credentials are configured. Logs and drops the message.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Mail relay not configured; email dropped"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Sends on a detached task and returns immediately.
    pub fn dispatch(&self, email: OutgoingEmail) {
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            let to = email.to.clone();
            let subject = email.subject.clone();
            if let Err(e) = mailer.send(email).await {
                tracing::error!(to = %to, subject = %subject, error = %e, "Failed to send email");
            }
        });
    }

    /// Awaited send for callers that report per-recipient results.
    pub async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        self.mailer.send(email).await
    }
}

//! SMTP delivery for the notification templates.
//!
//! Uses `lettre` against the Gmail relay (STARTTLS on the configured port) with an
//! app password. When no credentials are configured the server falls back to
//! `NoopMailer`, which logs and drops each message.

use async_trait::async_trait;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use services::AppError;
use services::notification::{Mailer, NoopMailer, OutgoingEmail};
use std::sync::Arc;
use util::config::AppConfig;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let tls_parameters = TlsParameters::new(config.smtp_host.clone())
            .map_err(|e| AppError::ExternalService(format!("TLS setup failed: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::ExternalService(format!("SMTP transport failed: {e}")))?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_parameters))
            .credentials(Credentials::new(
                config.gmail_username.clone(),
                config.gmail_app_password.clone(),
            ))
            .build();

        let address: Address = config
            .gmail_username
            .parse()
            .map_err(|e| AppError::ExternalService(format!("Invalid sender address: {e}")))?;

        Ok(Self {
            transport,
            from: Mailbox::new(Some(config.email_from_name.clone()), address),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let to: Mailbox = email.to.parse().map_err(|e| {
            AppError::ExternalService(format!("Invalid recipient {}: {e}", email.to))
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(email.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(email.html),
                    ),
            )
            .map_err(|e| AppError::ExternalService(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| AppError::ExternalService(format!("SMTP send failed: {e}")))
    }
}

/// SMTP when credentials are present, otherwise the logging no-op.
pub fn mailer_from_config(config: &AppConfig) -> Arc<dyn Mailer> {
    if !config.mail_configured() {
        tracing::warn!("GMAIL_USERNAME / GMAIL_APP_PASSWORD not set; outgoing email is disabled");
        return Arc::new(NoopMailer);
    }

    match SmtpMailer::from_config(config) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            tracing::error!(error = %e, "Mail relay misconfigured; outgoing email is disabled");
            Arc::new(NoopMailer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        let mut config = AppConfig::from_env();
        config.gmail_username = "club@gmail.com".into();
        config.gmail_app_password = "app-password".into();
        config.email_from_name = "Training & Placement Cell".into();
        config.smtp_host = "smtp.gmail.com".into();
        config.smtp_port = 587;
        config
    }

    #[tokio::test]
    async fn builds_transport_with_display_name_containing_ampersand() {
        let mailer = SmtpMailer::from_config(&config()).unwrap();
        assert_eq!(mailer.from.email.to_string(), "club@gmail.com");
        assert_eq!(mailer.from.name.as_deref(), Some("Training & Placement Cell"));
    }

    #[tokio::test]
    async fn rejects_malformed_sender() {
        let mut config = config();
        config.gmail_username = "not an address".into();
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(AppError::ExternalService(_))
        ));
    }
}

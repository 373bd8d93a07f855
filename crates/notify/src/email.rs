//! Email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send plain-text
//! emails (digests and submission alerts). Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`]
//! returns `None` and no mailer should be constructed.

use pasos_core::digest::DigestEmail;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    #[error("No recipients configured")]
    NoRecipients,
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@pasos.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Where booking/testimonial alerts go. Falls back to the digest list.
    pub studio_notify_email: Option<String>,
    /// Default digest recipients.
    pub digest_recipients: Vec<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable              | Required | Default               |
    /// |-----------------------|----------|-----------------------|
    /// | `SMTP_HOST`           | yes      |                       |
    /// | `SMTP_PORT`           | no       | `587`                 |
    /// | `SMTP_FROM`           | no       | `noreply@pasos.local` |
    /// | `SMTP_USER`           | no       |                       |
    /// | `SMTP_PASSWORD`       | no       |                       |
    /// | `STUDIO_NOTIFY_EMAIL` | no       |                       |
    /// | `DIGEST_RECIPIENTS`   | no       | comma-separated list  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            studio_notify_email: std::env::var("STUDIO_NOTIFY_EMAIL")
                .ok()
                .filter(|e| !e.trim().is_empty()),
            digest_recipients: std::env::var("DIGEST_RECIPIENTS")
                .map(|v| parse_recipients(&v))
                .unwrap_or_default(),
        })
    }

    /// Recipients for submission alerts.
    pub fn alert_recipients(&self) -> Vec<String> {
        match &self.studio_notify_email {
            Some(addr) => vec![addr.clone()],
            None => self.digest_recipients.clone(),
        }
    }
}

/// Split a comma/semicolon separated address list, dropping blanks.
pub fn parse_recipients(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends plain-text emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    /// Create a new email delivery service with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Send `email` to every address in `recipients` as a single message.
    pub async fn send(&self, recipients: &[String], email: &DigestEmail) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        if recipients.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);
        for to in recipients {
            builder = builder.to(to.parse()?);
        }
        let message = builder
            .body(email.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(message).await?;

        tracing::info!(
            recipients = recipients.len(),
            subject = %email.subject,
            "Email sent"
        );
        Ok(())
    }

    /// Send a submission alert to the studio. Returns `false` when no alert
    /// recipient is configured.
    pub async fn notify_studio(&self, email: &DigestEmail) -> Result<bool, EmailError> {
        let recipients = self.config.alert_recipients();
        if recipients.is_empty() {
            tracing::debug!(subject = %email.subject, "No studio alert recipient configured");
            return Ok(false);
        }
        self.send(&recipients, email).await?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            smtp_user: None,
            smtp_password: None,
            studio_notify_email: None,
            digest_recipients: vec!["owner@example.com".to_string(), "desk@example.com".to_string()],
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn recipients_are_split_and_trimmed() {
        assert_eq!(
            parse_recipients(" a@example.com, b@example.com;;c@example.com ,"),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
        assert!(parse_recipients("  ").is_empty());
    }

    #[test]
    fn alerts_prefer_studio_address() {
        let mut cfg = config();
        assert_eq!(cfg.alert_recipients().len(), 2);

        cfg.studio_notify_email = Some("studio@example.com".to_string());
        assert_eq!(cfg.alert_recipients(), vec!["studio@example.com"]);
    }

    #[tokio::test]
    async fn send_without_recipients_fails_before_connecting() {
        let mailer = EmailDelivery::new(config());
        let email = DigestEmail {
            subject: "s".to_string(),
            body: "b".to_string(),
        };
        let err = mailer.send(&[], &email).await.unwrap_err();
        assert!(matches!(err, EmailError::NoRecipients));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}

//! Notification delivery for balance alerts

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, SendError};
use crate::models::{EmailContent, Severity};

/// Port on which SMTP servers expect TLS from the first byte
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Result of sending a notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResult {
    /// Tier that was dispatched
    pub severity: Severity,
    /// Subject of the rendered message
    pub subject: String,
    /// Whether the transport accepted the message
    pub success: bool,
    /// Send error text when delivery failed
    pub error: Option<String>,
    /// When the attempt finished
    pub sent_at: DateTime<Utc>,
}

impl NotificationResult {
    /// Record the outcome of one dispatch attempt
    pub fn new(severity: Severity, content: &EmailContent, result: Result<(), SendError>) -> Self {
        Self {
            severity,
            subject: content.subject.clone(),
            success: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            sent_at: Utc::now(),
        }
    }
}

/// Delivers one rendered notification per call
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single message, without retrying
    async fn send(&self, content: &EmailContent) -> Result<(), SendError>;
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity {
    /// TLS from the start of the connection (port 465)
    ImplicitTls,
    /// Upgrade with STARTTLS when the server offers it
    Opportunistic,
}

impl TransportSecurity {
    /// Pick the security mode for a port
    pub fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            Self::ImplicitTls
        } else {
            Self::Opportunistic
        }
    }

    /// Whether the connection is encrypted before any SMTP traffic
    pub fn is_secure(self) -> bool {
        matches!(self, Self::ImplicitTls)
    }
}

/// Sends notifications through an authenticated SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    security: TransportSecurity,
    from: String,
    to: String,
}

impl SmtpNotifier {
    /// Create a notifier from the SMTP and address settings
    ///
    /// Fails only when the TLS layer cannot accept `SMTP_HOST` as a server
    /// name. Addresses are checked when a message is sent.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let smtp = &config.smtp;
        let security = TransportSecurity::for_port(smtp.port);

        let tls_parameters = TlsParameters::new(smtp.host.clone())
            .map_err(|_| ConfigError::invalid("SMTP_HOST", smtp.host.clone()))?;
        let tls = match security {
            TransportSecurity::ImplicitTls => Tls::Wrapper(tls_parameters),
            TransportSecurity::Opportunistic => Tls::Opportunistic(tls_parameters),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp.host.as_str())
            .port(smtp.port)
            .tls(tls)
            .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
            .build();

        debug!(
            host = %smtp.host,
            port = smtp.port,
            secure = security.is_secure(),
            "SMTP transport configured"
        );

        Ok(Self {
            transport,
            security,
            from: config.email.from.clone(),
            to: config.email.to.clone(),
        })
    }

    /// Security mode derived from the configured port
    pub fn security(&self) -> TransportSecurity {
        self.security
    }

    /// Build the MIME message for a notification
    pub fn build_message(&self, content: &EmailContent) -> Result<Message, SendError> {
        build_message(&self.from, &self.to, content)
    }
}

#[async_trait]
impl Mailer for SmtpNotifier {
    async fn send(&self, content: &EmailContent) -> Result<(), SendError> {
        let message = self.build_message(content)?;
        let response = self.transport.send(message).await?;

        info!(
            to = %self.to,
            subject = %content.subject,
            code = %response.code(),
            "Email sent"
        );
        Ok(())
    }
}

/// Logs notifications instead of sending them
#[derive(Debug, Default)]
pub struct DryRunMailer {
    sent: Mutex<Vec<EmailContent>>,
}

impl DryRunMailer {
    /// Create a new dry-run mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages that would have been sent, in order
    pub fn sent(&self) -> Vec<EmailContent> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, content: &EmailContent) -> Result<(), SendError> {
        info!(
            subject = %content.subject,
            text_len = content.text.len(),
            html_len = content.html.len(),
            "Dry run, email not sent"
        );
        self.sent.lock().push(content.clone());
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, SendError> {
    address.parse().map_err(|e: lettre::address::AddressError| SendError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn build_message(from: &str, to: &str, content: &EmailContent) -> Result<Message, SendError> {
    let message = Message::builder()
        .from(parse_mailbox(from)?)
        .to(parse_mailbox(to)?)
        .subject(content.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            content.text.clone(),
            content.html.clone(),
        ))?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(port: &str) -> Config {
        Config::from_vars([
            ("DESCO_ACCOUNT_NO", "123"),
            ("DESCO_METER_NO", "456"),
            ("EMAIL_TO", "test@example.com"),
            ("EMAIL_FROM", "from@example.com"),
            ("SMTP_HOST", "smtp.test.com"),
            ("SMTP_PORT", port),
            ("SMTP_USER", "user@test.com"),
            ("SMTP_PASS", "password"),
        ])
        .unwrap()
    }

    fn content() -> EmailContent {
        EmailContent {
            subject: "Test Subject".to_string(),
            text: "Test text".to_string(),
            html: "<p>Test HTML</p>".to_string(),
        }
    }

    #[test]
    fn test_security_for_port() {
        assert_eq!(TransportSecurity::for_port(465), TransportSecurity::ImplicitTls);
        assert_eq!(TransportSecurity::for_port(587), TransportSecurity::Opportunistic);
        assert_eq!(TransportSecurity::for_port(25), TransportSecurity::Opportunistic);
        assert!(TransportSecurity::for_port(465).is_secure());
        assert!(!TransportSecurity::for_port(587).is_secure());
    }

    #[tokio::test]
    async fn test_notifier_uses_implicit_tls_on_465() {
        let notifier = SmtpNotifier::new(&test_config("465")).unwrap();
        assert!(notifier.security().is_secure());
    }

    #[tokio::test]
    async fn test_notifier_is_not_secure_on_587() {
        let notifier = SmtpNotifier::new(&test_config("587")).unwrap();
        assert_eq!(notifier.security(), TransportSecurity::Opportunistic);
    }

    #[tokio::test]
    async fn test_message_carries_addresses_and_both_bodies() {
        let notifier = SmtpNotifier::new(&test_config("587")).unwrap();
        let message = notifier.build_message(&content()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: from@example.com"));
        assert!(raw.contains("To: test@example.com"));
        assert!(raw.contains("Subject: Test Subject"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Test text"));
        assert!(raw.contains("<p>Test HTML</p>"));
    }

    #[test]
    fn test_invalid_address_is_a_send_error() {
        let err = build_message("not an address", "test@example.com", &content()).unwrap_err();

        match err {
            SendError::Address { address, .. } => assert_eq!(address, "not an address"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_notification_result_records_failure() {
        let result = NotificationResult::new(
            Severity::Warning,
            &content(),
            Err(SendError::Smtp("SMTP Error".to_string())),
        );

        assert!(!result.success);
        assert_eq!(result.subject, "Test Subject");
        assert_eq!(result.error.as_deref(), Some("SMTP error: SMTP Error"));
    }

    #[tokio::test]
    async fn test_dry_run_records_messages() {
        let mailer = DryRunMailer::new();
        mailer.send(&content()).await.unwrap();

        assert_eq!(mailer.sent(), vec![content()]);
    }
}

//! Email delivery of meeting summaries over SMTP.
//!
//! One call opens one SMTP session:
//! connect, STARTTLS (when configured), authenticate, send, close.

mod config;
mod transport;

use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Message;
use tracing::{info, warn};

use crate::error::{DeliveryError, Error, SmtpStage};

pub use config::{SmtpConfig, TlsMode};
pub use transport::{LettreConnector, SmtpConnector, SmtpSession};

/// Subject used when the caller does not provide one.
pub const DEFAULT_SUBJECT: &str = "Meeting Summary";

/// Sends summaries by email through the configured relay.
pub struct EmailNotifier {
    config: SmtpConfig,
    connector: Arc<dyn SmtpConnector>,
}

impl EmailNotifier {
    /// Create a notifier that talks to a real SMTP server.
    pub fn new(config: SmtpConfig) -> Self {
        let connector = Arc::new(LettreConnector::new(config.timeout()));
        Self::with_connector(config, connector)
    }

    /// Create a notifier with a custom transport.
    pub fn with_connector(config: SmtpConfig, connector: Arc<dyn SmtpConnector>) -> Self {
        Self { config, connector }
    }

    /// Send `body` as a plain-text email to `to_email`.
    pub async fn send_summary_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), Error> {
        if !self.config.has_credentials() {
            return Err(Error::configuration(
                "SMTP credentials missing. Set SMTP_USER and SMTP_PASS.",
            ));
        }

        let message = self.build_message(to_email, subject, body)?;
        let credentials =
            Credentials::new(self.config.user.clone(), self.config.password.clone());

        let mut session = self
            .connector
            .connect(&self.config.host, self.config.port, self.config.tls)
            .await
            .map_err(|e| DeliveryError::new(SmtpStage::Connect, e))?;

        let outcome = self
            .deliver(session.as_mut(), &credentials, &message)
            .await;
        session.close().await;

        match &outcome {
            Ok(()) => info!("Summary email sent to {}", to_email),
            Err(e) => warn!("Summary email to {} failed: {}", to_email, e),
        }
        outcome.map_err(Error::from)
    }

    /// Steps run on an open session. The caller closes the session.
    async fn deliver(
        &self,
        session: &mut dyn SmtpSession,
        credentials: &Credentials,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        if self.config.tls == TlsMode::StartTls {
            session
                .starttls()
                .await
                .map_err(|e| DeliveryError::new(SmtpStage::StartTls, e))?;
        }
        session
            .authenticate(credentials)
            .await
            .map_err(|e| DeliveryError::new(SmtpStage::Authenticate, e))?;
        session
            .send(message)
            .await
            .map_err(|e| DeliveryError::new(SmtpStage::Send, e))
    }

    fn build_message(&self, to_email: &str, subject: &str, body: &str) -> Result<Message, Error> {
        let to: Mailbox = parse_recipient(to_email)?;
        let from: Mailbox = self.config.sender().parse().map_err(|e| {
            Error::configuration(format!(
                "Invalid sender address '{}': {}",
                self.config.sender(),
                e
            ))
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| Error::validation(format!("Failed to build email: {}", e)))
    }
}

/// Parse a recipient address, rejecting anything that is not a valid mailbox.
pub fn parse_recipient(to_email: &str) -> Result<Mailbox, Error> {
    to_email
        .trim()
        .parse()
        .map_err(|e| Error::validation(format!("Invalid email address '{}': {}", to_email, e)))
}

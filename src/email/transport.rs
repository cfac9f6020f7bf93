//! SMTP session abstraction and the lettre-backed implementation.
//!
//! The notifier drives a session step by step (connect, optional STARTTLS,
//! authenticate, send, close) so the order of steps is decided in one place
//! and can be observed by a recording transport in tests.

use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{AsyncSmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use lettre::Message;
use tracing::debug;

use super::config::TlsMode;
use crate::error::BoxError;

/// Opens SMTP sessions.
#[async_trait]
pub trait SmtpConnector: Send + Sync {
    /// Open a connection and read the greeting. With [`TlsMode::Implicit`]
    /// the connection is TLS-wrapped before the first byte is exchanged.
    async fn connect(
        &self,
        host: &str,
        port: u16,
        tls: TlsMode,
    ) -> Result<Box<dyn SmtpSession>, BoxError>;
}

/// One open SMTP connection.
#[async_trait]
pub trait SmtpSession: Send {
    async fn starttls(&mut self) -> Result<(), BoxError>;

    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), BoxError>;

    async fn send(&mut self, message: &Message) -> Result<(), BoxError>;

    /// Say QUIT and release the connection. Never fails.
    async fn close(&mut self);
}

/// Connector using lettre's low-level async SMTP client on tokio.
pub struct LettreConnector {
    timeout: Option<Duration>,
    hello_name: ClientId,
}

impl LettreConnector {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            hello_name: ClientId::default(),
        }
    }
}

#[async_trait]
impl SmtpConnector for LettreConnector {
    async fn connect(
        &self,
        host: &str,
        port: u16,
        tls: TlsMode,
    ) -> Result<Box<dyn SmtpSession>, BoxError> {
        let tls_parameters = TlsParameters::new(host.to_string())?;
        let wrapper = match tls {
            TlsMode::Implicit => Some(tls_parameters.clone()),
            TlsMode::StartTls => None,
        };

        debug!("Connecting to SMTP server {}:{} ({:?})", host, port, tls);
        let connection = AsyncSmtpConnection::connect_tokio1(
            (host, port),
            self.timeout,
            &self.hello_name,
            wrapper,
            None,
        )
        .await?;

        Ok(Box::new(LettreSession {
            connection,
            tls_parameters,
            hello_name: self.hello_name.clone(),
        }))
    }
}

struct LettreSession {
    connection: AsyncSmtpConnection,
    tls_parameters: TlsParameters,
    hello_name: ClientId,
}

#[async_trait]
impl SmtpSession for LettreSession {
    async fn starttls(&mut self) -> Result<(), BoxError> {
        self.connection
            .starttls(self.tls_parameters.clone(), &self.hello_name)
            .await?;
        Ok(())
    }

    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), BoxError> {
        self.connection
            .auth(&[Mechanism::Plain, Mechanism::Login], credentials)
            .await?;
        Ok(())
    }

    async fn send(&mut self, message: &Message) -> Result<(), BoxError> {
        self.connection
            .send(message.envelope(), &message.formatted())
            .await?;
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.connection.quit().await {
            debug!("SMTP QUIT failed, aborting connection: {}", e);
            self.connection.abort().await;
        }
    }
}

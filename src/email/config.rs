//! SMTP relay configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS before authenticating (port 587)
    #[default]
    StartTls,
    /// TLS from the first byte (port 465)
    Implicit,
}

impl TlsMode {
    /// Interpret the `SMTP_USE_TLS` flag: true/1/yes selects STARTTLS,
    /// anything else selects implicit TLS.
    pub fn from_use_tls_flag(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => TlsMode::StartTls,
            _ => TlsMode::Implicit,
        }
    }
}

/// Configuration for outgoing summary emails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Sender address; falls back to `user` when empty
    pub from: String,
    pub tls: TlsMode,
    /// Bound on each network step of the SMTP session, in seconds
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            user: String::new(),
            password: String::new(),
            from: String::new(),
            tls: TlsMode::default(),
            timeout_secs: 30,
        }
    }
}

impl SmtpConfig {
    /// Apply overrides from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`,
    /// `SMTP_FROM`, `SMTP_USE_TLS` and `SMTP_TIMEOUT_SECS`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SMTP_HOST") {
            self.host = val;
        }
        if let Some(val) = lookup("SMTP_PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid SMTP_PORT value: {}", val),
            }
        }
        if let Some(val) = lookup("SMTP_USER") {
            self.user = val;
        }
        if let Some(val) = lookup("SMTP_PASS") {
            self.password = val;
        }
        if let Some(val) = lookup("SMTP_FROM") {
            self.from = val;
        }
        if let Some(val) = lookup("SMTP_USE_TLS") {
            self.tls = TlsMode::from_use_tls_flag(&val);
        }
        if let Some(val) = lookup("SMTP_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid SMTP_TIMEOUT_SECS value: {}", val),
            }
        }
        self
    }

    /// Both username and password are set.
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.password.is_empty()
    }

    /// Address used in the `From` header.
    pub fn sender(&self) -> &str {
        if self.from.trim().is_empty() {
            &self.user
        } else {
            &self.from
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

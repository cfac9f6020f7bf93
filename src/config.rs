//! Configuration management for notetaker.
//!
//! Settings are layered: compiled-in defaults, then an optional TOML file,
//! then environment variables. They are loaded once at startup and shared
//! read-only afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::email::SmtpConfig;
use crate::llm::LlmConfig;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "notetaker.toml";

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allowed browser origin for CORS; `*` allows any origin
    pub frontend_origin: String,
    /// Address the server listens on
    pub bind: String,
    /// Largest accepted request body (uploads included)
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            frontend_origin: "*".to_string(),
            bind: "127.0.0.1:8000".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Apply overrides from `FRONTEND_ORIGIN`, `BIND_ADDRESS` and `MAX_UPLOAD_BYTES`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FRONTEND_ORIGIN") {
            self.frontend_origin = val;
        }
        if let Some(val) = lookup("BIND_ADDRESS") {
            self.bind = val;
        }
        if let Some(val) = lookup("MAX_UPLOAD_BYTES") {
            match val.parse() {
                Ok(n) => self.max_upload_bytes = n,
                Err(_) => warn!("Ignoring invalid MAX_UPLOAD_BYTES value: {}", val),
            }
        }
        self
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        let origin = self.frontend_origin.trim();
        origin.is_empty() || origin == "*"
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmConfig,
    pub smtp: SmtpConfig,
    pub server: ServerConfig,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// Options for loading settings.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Explicit config file; it must exist.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from file (if any) and the process environment.
    pub fn load(options: LoadOptions) -> anyhow::Result<Self> {
        Self::load_with(options, |key| std::env::var(key).ok())
    }

    /// Load settings using an arbitrary environment lookup.
    pub fn load_with<F>(options: LoadOptions, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = match options.config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::from_file(&path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(settings.with_overrides_from(lookup))
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let mut settings: Settings = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        debug!("Loaded config from {}", path.display());
        settings.source_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Apply environment overrides to every section.
    pub fn with_overrides_from<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            llm: self.llm.with_overrides_from(&lookup),
            smtp: self.smtp.with_overrides_from(&lookup),
            server: self.server.with_overrides_from(&lookup),
            source_path: self.source_path,
        }
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.llm.api_key = mask(&copy.llm.api_key);
        copy.smtp.password = mask(&copy.smtp.password);
        copy
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

//! Web server exposing transcript ingestion, summarization and sharing.
//!
//! Routes:
//! - `GET /health`
//! - `POST /upload-text` (form field `transcript`)
//! - `POST /upload-file` (multipart field `file`, `.txt` only)
//! - `POST /summarize` (JSON `{transcript, prompt?}`)
//! - `POST /share` (form fields `email`, `subject?`, `summary`)

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::{cors_layer, create_router};

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;

use crate::config::Settings;
use crate::email::EmailNotifier;
use crate::llm::SummarizerClient;

/// Shared state for the web server. Everything here is read-only.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub summarizer: Arc<SummarizerClient>,
    pub notifier: Arc<EmailNotifier>,
    pub cors: CorsLayer,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let summarizer = SummarizerClient::new(&settings.llm)?;
        let notifier = EmailNotifier::new(settings.smtp.clone());
        Self::from_parts(settings.clone(), summarizer, notifier)
    }

    /// Assemble state from already-built components.
    pub fn from_parts(
        settings: Settings,
        summarizer: SummarizerClient,
        notifier: EmailNotifier,
    ) -> anyhow::Result<Self> {
        let cors = cors_layer(&settings.server)?;
        Ok(Self {
            settings: Arc::new(settings),
            summarizer: Arc::new(summarizer),
            notifier: Arc::new(notifier),
            cors,
        })
    }
}

/// Start the web server and run until Ctrl+C.
pub async fn serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = bind.parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

//! HTTP request handlers for the web server.

mod api;
mod share;
mod summarize;
mod upload;

// Re-export handlers for use by the router
pub use api::health;
pub use share::share;
pub use summarize::summarize;
pub use upload::{upload_file, upload_text};

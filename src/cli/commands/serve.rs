//! Web server command.

use crate::cli::icons::Icon;
use crate::config::Settings;

/// Default port when only a host is given.
const DEFAULT_PORT: u16 = 8000;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or(&settings.server.bind);
    let (host, port) = parse_bind_address(bind)?;

    if let Some(path) = &settings.source_path {
        println!("{} Using config {}", Icon::Note, path.display());
    }
    if !settings.llm.has_api_key() {
        println!(
            "{} OPENAI_API_KEY is not set; summaries are disabled",
            Icon::Warning
        );
    }
    if !settings.smtp.has_credentials() {
        println!(
            "{} SMTP_USER/SMTP_PASS are not set; email sharing is disabled",
            Icon::Warning
        );
    }

    println!(
        "{} Starting notetaker server at http://{}:{}",
        Icon::Step,
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &format!("{}:{}", host, port)).await
}

/// Parse a bind address that can be:
/// - Just a port: "8000" -> 127.0.0.1:8000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8000
/// - Host and port: "0.0.0.0:8000" -> 0.0.0.0:8000
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    let bind = bind.trim();
    if bind.is_empty() {
        anyhow::bail!("Bind address is empty");
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), DEFAULT_PORT))
}

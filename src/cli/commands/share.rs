//! Share command.

use std::path::Path;

use super::read_input;
use crate::cli::icons::Icon;
use crate::config::Settings;
use crate::email::{EmailNotifier, DEFAULT_SUBJECT};

/// Email the contents of a summary file.
pub async fn cmd_share(
    settings: &Settings,
    file: &Path,
    to: &str,
    subject: Option<&str>,
) -> anyhow::Result<()> {
    let summary = read_input(file)?;
    if summary.trim().is_empty() {
        anyhow::bail!("{} is empty", file.display());
    }

    let notifier = EmailNotifier::new(settings.smtp.clone());
    match notifier
        .send_summary_email(to, subject.unwrap_or(DEFAULT_SUBJECT), &summary)
        .await
    {
        Ok(()) => {
            eprintln!("{} Summary sent to {}", Icon::Done, to);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} Email failed: {}", Icon::Failed, e);
            Err(e.into())
        }
    }
}

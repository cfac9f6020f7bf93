//! Summarize command.

use std::path::Path;

use console::style;

use super::read_input;
use crate::cli::icons::Icon;
use crate::config::Settings;
use crate::email::{EmailNotifier, DEFAULT_SUBJECT};
use crate::llm::SummarizerClient;

/// Summarize a transcript and print the notes; optionally email them.
pub async fn cmd_summarize(
    settings: &Settings,
    file: &Path,
    prompt: Option<&str>,
    share_to: Option<&str>,
    subject: Option<&str>,
) -> anyhow::Result<()> {
    let transcript = read_input(file)?;
    let client = SummarizerClient::new(&settings.llm)?;

    eprintln!(
        "{} Summarizing {} with {}",
        Icon::Step,
        file.display(),
        style(client.model()).bold()
    );
    let summary = match client.summarize(&transcript, prompt.unwrap_or_default()).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} Summarization failed: {}", Icon::Failed, e);
            return Err(e.into());
        }
    };

    println!("{}", summary);

    if let Some(to) = share_to {
        let notifier = EmailNotifier::new(settings.smtp.clone());
        notifier
            .send_summary_email(to, subject.unwrap_or(DEFAULT_SUBJECT), &summary)
            .await?;
        eprintln!("{} Summary sent to {}", Icon::Done, to);
    }

    Ok(())
}

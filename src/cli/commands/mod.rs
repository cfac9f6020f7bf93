//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod serve;
mod share;
mod summarize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{LoadOptions, Settings};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "Summarize meeting transcripts and share the notes by email")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./notetaker.toml when present)
    #[arg(short, long, global = true, env = "NOTETAKER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind: "8000", "0.0.0.0" or "0.0.0.0:8000" (defaults to config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Summarize a transcript file and print the notes
    Summarize {
        /// Transcript file, or "-" to read from stdin
        file: PathBuf,
        /// Custom instruction for the summarizer
        #[arg(short, long)]
        prompt: Option<String>,
        /// Also email the summary to this address
        #[arg(long)]
        share_to: Option<String>,
        /// Subject used with --share-to
        #[arg(long)]
        subject: Option<String>,
    },

    /// Email an existing summary file
    Share {
        /// Summary file, or "-" to read from stdin
        file: PathBuf,
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Email subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show the effective configuration (secrets redacted)
    Config,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(LoadOptions {
        config_path: cli.config,
    })?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Summarize {
            file,
            prompt,
            share_to,
            subject,
        } => {
            summarize::cmd_summarize(
                &settings,
                &file,
                prompt.as_deref(),
                share_to.as_deref(),
                subject.as_deref(),
            )
            .await
        }
        Commands::Share { file, to, subject } => {
            share::cmd_share(&settings, &file, &to, subject.as_deref()).await
        }
        Commands::Config => config_cmd::cmd_config_show(&settings),
    }
}

/// Read a file, or stdin when the path is "-".
fn read_input(path: &std::path::Path) -> anyhow::Result<String> {
    use std::io::Read;

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

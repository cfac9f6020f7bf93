//! Configuration display command.

use crate::cli::icons::Icon;
use crate::config::Settings;

/// Print the effective configuration as TOML with secrets masked.
pub fn cmd_config_show(settings: &Settings) -> anyhow::Result<()> {
    match &settings.source_path {
        Some(path) => eprintln!("{} Config file: {}", Icon::Note, path.display()),
        None => eprintln!(
            "{} No config file; using defaults and environment",
            Icon::Note
        ),
    }

    let rendered = toml::to_string_pretty(&settings.redacted())?;
    println!("{}", rendered);
    Ok(())
}

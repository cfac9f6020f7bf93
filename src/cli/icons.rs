//! Status markers printed in front of CLI messages.

use std::fmt;

use console::style;

/// Outcome marker for a line of CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Summary produced or email delivered
    Done,
    /// Work in progress
    Step,
    /// Degraded but running, e.g. a missing credential
    Warning,
    Failed,
    /// Secondary detail such as the config file in use
    Note,
}

impl Icon {
    fn glyph(self) -> &'static str {
        match self {
            Icon::Done => "✓",
            Icon::Step | Icon::Note => "→",
            Icon::Warning => "!",
            Icon::Failed => "✗",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = style(self.glyph());
        let styled = match self {
            Icon::Done => glyph.green(),
            Icon::Step => glyph.cyan(),
            Icon::Warning => glyph.yellow(),
            Icon::Failed => glyph.red(),
            Icon::Note => glyph.dim(),
        };
        write!(f, "{}", styled)
    }
}

//! Command-line interface for notetaker.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};

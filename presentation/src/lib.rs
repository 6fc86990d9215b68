//! Presentation layer for notegpt
//!
//! This crate contains the CLI definition, console notices and
//! the progress spinner.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, DEFAULT_SYSTEM_PROMPT};
pub use output::console::{ConsoleFormatter, ConsoleNotifier};
pub use progress::reporter::ProgressReporter;

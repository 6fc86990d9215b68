//! Console output: user notices and session summaries

pub mod console;

pub use console::{ConsoleFormatter, ConsoleNotifier};

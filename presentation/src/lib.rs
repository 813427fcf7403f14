//! Presentation layer for triad
//!
//! CLI argument definitions, console output formatting, progress
//! reporting, and the interactive REPL. Everything here is a pure
//! consumer of the application layer's solve entry point.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::{console::ConsoleFormatter, formatter::OutputFormatter as OutputFormatterTrait};
pub use progress::reporter::ProgressReporter;
pub use repl::SolveRepl;

//! Presentation layer for community-tribunal
//!
//! This crate contains CLI definitions, console output formatting and the
//! interactive console.

pub mod cli;
pub mod config;
pub mod console;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::ConsoleConfig;
pub use console::{ConsoleCommand, TribunalConsole};
pub use output::activity::ConsoleActivityPrinter;
pub use output::console::ConsoleFormatter;

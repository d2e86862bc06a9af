//! Interactive console module
//!
//! Provides a readline-based console for acting as members of a simulated
//! community.

mod command;
mod repl;

pub use command::{ConsoleCommand, ParseError, SettingsCommand, help_text};
pub use repl::TribunalConsole;

//! Console output
//!
//! - [`ConsoleFormatter`](console::ConsoleFormatter) renders messages and replies
//! - [`ConsoleActivityPrinter`](activity::ConsoleActivityPrinter) echoes platform activity

pub mod activity;
pub mod console;

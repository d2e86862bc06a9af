//! Presentation-level configuration
//!
//! Configuration for console behavior.

use serde::{Deserialize, Serialize};

/// Console configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
            history_file: None,
        }
    }
}

//! Configuration file loading for community-tribunal
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./tribunal.toml` or `./.tribunal.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/community-tribunal/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuditConfig, FileChannel, FileConfig, FileConsoleConfig,
    FileLoggingConfig, FileMember, FileRole, FileSimulationConfig, FileStorageConfig,
    FileVoteConfig,
};
pub use loader::ConfigLoader;

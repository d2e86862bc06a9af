//! Infrastructure layer for community-tribunal
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod platform;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAuditConfig, FileConfig, FileConsoleConfig,
    FileLoggingConfig, FileSimulationConfig, FileStorageConfig, FileVoteConfig,
};
pub use logging::JsonlAuditLogger;
pub use platform::SimulatedPlatform;
pub use storage::JsonSettingsRepository;

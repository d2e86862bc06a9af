//! Application-level configuration.
//!
//! - [`TribunalConfig`]: vote window limits and enforcement durations

pub mod tribunal_config;

pub use tribunal_config::{PLATFORM_MAX_TIMEOUT, PLATFORM_MAX_TIMEOUT_MINUTES, TribunalConfig};

//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod community_settings;

pub use community_settings::{CommunitySettings, SettingChange};

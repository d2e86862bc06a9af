//! Persistent storage adapters.

mod json_settings;

pub use json_settings::JsonSettingsRepository;

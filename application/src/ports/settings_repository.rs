//! Community settings port
//!
//! Per-community configuration (announcement channel, tally channel,
//! moderator role) is owned by an external store. Settings are loaded on
//! every use so changes apply immediately.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tribunal_domain::{CommunityId, CommunitySettings, SettingChange};

/// Errors that can occur while reading or writing settings
#[derive(Error, Debug, Clone)]
pub enum SettingsError {
    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("Settings file is corrupt: {0}")]
    Corrupt(String),
}

/// Repository for per-community settings
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Settings for a community; defaults when nothing was stored
    async fn load(&self, community: CommunityId) -> Result<CommunitySettings, SettingsError>;

    /// Apply a change and return the updated settings
    async fn update(
        &self,
        community: CommunityId,
        change: SettingChange,
    ) -> Result<CommunitySettings, SettingsError>;
}

/// Volatile settings kept in memory
///
/// Used by tests and when no settings file is configured.
#[derive(Default)]
pub struct InMemorySettings {
    settings: Mutex<HashMap<CommunityId, CommunitySettings>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a community's settings
    pub fn with(self, community: CommunityId, settings: CommunitySettings) -> Self {
        if let Ok(mut map) = self.settings.lock() {
            map.insert(community, settings);
        }
        self
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn load(&self, community: CommunityId) -> Result<CommunitySettings, SettingsError> {
        let map = self
            .settings
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        Ok(map.get(&community).copied().unwrap_or_default())
    }

    async fn update(
        &self,
        community: CommunityId,
        change: SettingChange,
    ) -> Result<CommunitySettings, SettingsError> {
        let mut map = self
            .settings
            .lock()
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        let settings = map.entry(community).or_default();
        change.apply(settings);
        let updated = *settings;
        if updated.is_empty() {
            map.remove(&community);
        }
        Ok(updated)
    }
}

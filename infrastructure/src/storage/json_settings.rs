//! JSON file store for per-community settings.
//!
//! The whole file is one JSON object keyed by community id:
//!
//! ```json
//! { "1": { "announcement_channel": 11, "tally_channel": null, "moderator_role": 20 } }
//! ```
//!
//! The file is read on every load so external edits apply immediately.
//! Writes go to a sibling temp file that is then renamed over the original.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use tribunal_application::{SettingsError, SettingsRepository};
use tribunal_domain::{CommunityId, CommunitySettings, SettingChange};

type SettingsDocument = BTreeMap<CommunityId, CommunitySettings>;

/// Settings repository backed by a single JSON file
pub struct JsonSettingsRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<SettingsDocument, SettingsError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SettingsDocument::new()),
            Err(e) => return Err(SettingsError::Storage(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(SettingsDocument::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            SettingsError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn write_document(&self, document: &SettingsDocument) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SettingsError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| SettingsError::Storage(e.to_string()))?;

        debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self, community: CommunityId) -> Result<CommunitySettings, SettingsError> {
        let document = self.read_document().await?;
        Ok(document.get(&community).copied().unwrap_or_default())
    }

    async fn update(
        &self,
        community: CommunityId,
        change: SettingChange,
    ) -> Result<CommunitySettings, SettingsError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        let settings = document.entry(community).or_default();
        change.apply(settings);
        let updated = *settings;
        if updated.is_empty() {
            document.remove(&community);
        }

        self.write_document(&document).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_domain::{ChannelId, RoleId};

    const COMMUNITY: CommunityId = CommunityId::new(1);

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonSettingsRepository::new(dir.path().join("settings.json"));

        assert_eq!(repo.load(COMMUNITY).await.unwrap(), CommunitySettings::default());
    }

    #[tokio::test]
    async fn test_update_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("settings.json");

        let repo = JsonSettingsRepository::new(&path);
        repo.update(COMMUNITY, SettingChange::TallyChannel(Some(ChannelId::new(12))))
            .await
            .unwrap();
        repo.update(COMMUNITY, SettingChange::ModeratorRole(Some(RoleId::new(20))))
            .await
            .unwrap();

        let reopened = JsonSettingsRepository::new(&path);
        let settings = reopened.load(COMMUNITY).await.unwrap();
        assert_eq!(settings.tally_channel, Some(ChannelId::new(12)));
        assert_eq!(settings.moderator_role, Some(RoleId::new(20)));
        assert_eq!(settings.announcement_channel, None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_communities_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonSettingsRepository::new(dir.path().join("settings.json"));

        repo.update(COMMUNITY, SettingChange::AnnouncementChannel(Some(ChannelId::new(5))))
            .await
            .unwrap();

        assert!(repo.load(CommunityId::new(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clearing_last_setting_drops_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let repo = JsonSettingsRepository::new(&path);

        repo.update(COMMUNITY, SettingChange::TallyChannel(Some(ChannelId::new(12))))
            .await
            .unwrap();
        repo.update(COMMUNITY, SettingChange::TallyChannel(None))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_reads_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"1": {"announcement_channel": 11}}"#).unwrap();

        let settings = JsonSettingsRepository::new(&path).load(COMMUNITY).await.unwrap();
        assert_eq!(settings.announcement_channel, Some(ChannelId::new(11)));
        assert_eq!(settings.moderator_role, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonSettingsRepository::new(&path).load(COMMUNITY).await.unwrap_err();
        assert!(matches!(err, SettingsError::Corrupt(_)));
    }
}

//! Per-community moderation settings

use crate::core::ids::{ChannelId, RoleId};
use serde::{Deserialize, Serialize};

/// Settings an administrator can change for one community
///
/// Every field is optional. An unset announcement channel means "post where
/// the command was run"; an unset tally channel means the live tally is not
/// published; an unset moderator role means only administrators may moderate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunitySettings {
    /// Where accusation prompts and announcements are posted
    pub announcement_channel: Option<ChannelId>,
    /// Where the live vote tally is posted
    pub tally_channel: Option<ChannelId>,
    /// Role that may start and stop accusations
    pub moderator_role: Option<RoleId>,
}

impl CommunitySettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "setting", content = "value", rename_all = "snake_case")]
pub enum SettingChange {
    AnnouncementChannel(Option<ChannelId>),
    TallyChannel(Option<ChannelId>),
    ModeratorRole(Option<RoleId>),
}

impl SettingChange {
    /// Apply to a settings value
    pub fn apply(self, settings: &mut CommunitySettings) {
        match self {
            SettingChange::AnnouncementChannel(channel) => settings.announcement_channel = channel,
            SettingChange::TallyChannel(channel) => settings.tally_channel = channel,
            SettingChange::ModeratorRole(role) => settings.moderator_role = role,
        }
    }

    /// Whether the change clears the setting
    pub fn is_clear(&self) -> bool {
        match self {
            SettingChange::AnnouncementChannel(c) | SettingChange::TallyChannel(c) => c.is_none(),
            SettingChange::ModeratorRole(r) => r.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(CommunitySettings::default().is_empty());
    }

    #[test]
    fn test_apply_and_clear() {
        let mut settings = CommunitySettings::default();
        SettingChange::TallyChannel(Some(ChannelId::new(5))).apply(&mut settings);
        assert_eq!(settings.tally_channel, Some(ChannelId::new(5)));

        let clear = SettingChange::TallyChannel(None);
        assert!(clear.is_clear());
        clear.apply(&mut settings);
        assert!(settings.is_empty());
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: CommunitySettings =
            serde_json::from_str(r#"{"moderator_role": 77}"#).unwrap();
        assert_eq!(settings.moderator_role, Some(RoleId::new(77)));
        assert_eq!(settings.announcement_channel, None);
    }
}

//! Community settings use case
//!
//! Administrators choose where prompts and tallies are posted and which
//! role may moderate. Changes take effect on the next command.

use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::platform::{ModerationPlatform, PlatformError};
use crate::ports::settings_repository::{SettingsError, SettingsRepository};
use crate::use_cases::error_kind::ErrorKind;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tribunal_domain::{
    AnnouncementTemplate, ChannelId, CommunityId, CommunitySettings, MemberId, SettingChange,
};

/// Errors from the settings commands
#[derive(Error, Debug)]
pub enum SettingsCommandError {
    #[error("You need administrator permissions to change settings.")]
    NotAdministrator,

    #[error("Please provide a valid channel or type \"none\" to clear the current setting.")]
    UnknownChannel(ChannelId),

    #[error("The platform rejected the request: {0}")]
    Platform(#[from] PlatformError),

    #[error("Could not access community settings: {0}")]
    Settings(#[from] SettingsError),
}

impl SettingsCommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettingsCommandError::NotAdministrator | SettingsCommandError::UnknownChannel(_) => {
                ErrorKind::Validation
            }
            SettingsCommandError::Platform(_) | SettingsCommandError::Settings(_) => {
                ErrorKind::ExternalAction
            }
        }
    }
}

/// Current settings of a community, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsOverview {
    pub community_name: String,
    pub settings: CommunitySettings,
}

impl SettingsOverview {
    pub fn render(&self) -> String {
        AnnouncementTemplate::settings_overview(&self.community_name, &self.settings)
    }
}

/// Private confirmation for an applied change
pub fn change_confirmation(change: &SettingChange) -> String {
    match change {
        SettingChange::AnnouncementChannel(Some(channel)) => {
            format!("Messages will now be sent to {}.", channel.mention())
        }
        SettingChange::AnnouncementChannel(None) => {
            "The channel setting has been cleared.".to_string()
        }
        SettingChange::TallyChannel(Some(channel)) => {
            format!("Votes will now be posted in {}.", channel.mention())
        }
        SettingChange::TallyChannel(None) => "The vote channel setting has been cleared.".to_string(),
        SettingChange::ModeratorRole(Some(role)) => {
            format!("The mod role has been set to {}.", role.mention())
        }
        SettingChange::ModeratorRole(None) => "The mod role setting has been cleared.".to_string(),
    }
}

pub struct CommunitySettingsUseCase<P: ModerationPlatform, S: SettingsRepository> {
    platform: Arc<P>,
    settings: Arc<S>,
    audit: Arc<dyn AuditLogger>,
}

impl<P: ModerationPlatform, S: SettingsRepository> CommunitySettingsUseCase<P, S> {
    pub fn new(platform: Arc<P>, settings: Arc<S>) -> Self {
        Self {
            platform,
            settings,
            audit: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Apply a change on behalf of `actor`
    ///
    /// Only administrators may change settings. A channel must exist in the
    /// community to be selected.
    pub async fn change(
        &self,
        community: CommunityId,
        actor: MemberId,
        change: SettingChange,
    ) -> Result<CommunitySettings, SettingsCommandError> {
        let member = self.platform.fetch_member(community, actor).await?;
        if !member.is_administrator {
            return Err(SettingsCommandError::NotAdministrator);
        }

        if let SettingChange::AnnouncementChannel(Some(channel))
        | SettingChange::TallyChannel(Some(channel)) = change
            && !self.platform.channel_exists(community, channel).await?
        {
            return Err(SettingsCommandError::UnknownChannel(channel));
        }

        let updated = self.settings.update(community, change).await?;
        info!("Settings of community {} changed by {}: {:?}", community, actor, change);
        self.audit.log(AuditEvent::new(
            "settings_changed",
            serde_json::json!({
                "community": community,
                "actor": actor,
                "change": change,
            }),
        ));

        Ok(updated)
    }

    /// Current settings with the community's display name
    pub async fn overview(
        &self,
        community: CommunityId,
    ) -> Result<SettingsOverview, SettingsCommandError> {
        let settings = self.settings.load(community).await?;
        let community_name = self.platform.community_name(community).await?;
        Ok(SettingsOverview {
            community_name,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::settings_repository::InMemorySettings;
    use crate::use_cases::test_support::*;
    use tribunal_domain::RoleId;

    fn setup() -> (
        CommunitySettingsUseCase<RecordingPlatform, InMemorySettings>,
        Arc<InMemorySettings>,
        Arc<RecordingAudit>,
    ) {
        let settings = Arc::new(InMemorySettings::new());
        let audit = Arc::new(RecordingAudit::default());
        let use_case =
            CommunitySettingsUseCase::new(Arc::new(RecordingPlatform::new()), settings.clone())
                .with_audit_logger(audit.clone());
        (use_case, settings, audit)
    }

    #[tokio::test]
    async fn test_admin_sets_and_clears_channel() {
        let (use_case, settings, audit) = setup();

        let updated = use_case
            .change(COMMUNITY, ADMIN, SettingChange::TallyChannel(Some(TALLY)))
            .await
            .unwrap();
        assert_eq!(updated.tally_channel, Some(TALLY));
        assert_eq!(settings.load(COMMUNITY).await.unwrap().tally_channel, Some(TALLY));

        let updated = use_case
            .change(COMMUNITY, ADMIN, SettingChange::TallyChannel(None))
            .await
            .unwrap();
        assert_eq!(updated.tally_channel, None);
        assert_eq!(audit.types(), vec!["settings_changed", "settings_changed"]);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_change_settings() {
        let (use_case, settings, _) = setup();

        let err = use_case
            .change(
                COMMUNITY,
                MODERATOR,
                SettingChange::ModeratorRole(Some(RoleId::new(77))),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SettingsCommandError::NotAdministrator));
        assert!(settings.load(COMMUNITY).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_channel_rejected() {
        let (use_case, _, _) = setup();

        let err = use_case
            .change(
                COMMUNITY,
                ADMIN,
                SettingChange::AnnouncementChannel(Some(ChannelId::new(404))),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_overview_renders_none_for_unset_values() {
        let (use_case, _, _) = setup();
        use_case
            .change(COMMUNITY, ADMIN, SettingChange::ModeratorRole(Some(MOD_ROLE)))
            .await
            .unwrap();

        let rendered = use_case.overview(COMMUNITY).await.unwrap().render();

        assert!(rendered.contains("Current Settings for Test Community"));
        assert!(rendered.contains("**Bot Channel**: None"));
        assert!(rendered.contains("**Mod Role**: <@&50>"));
        assert!(rendered.contains("**Vote Channel**: None"));
    }

    #[test]
    fn test_change_confirmation() {
        assert_eq!(
            change_confirmation(&SettingChange::AnnouncementChannel(Some(ChannelId::new(9)))),
            "Messages will now be sent to <#9>."
        );
        assert_eq!(
            change_confirmation(&SettingChange::ModeratorRole(None)),
            "The mod role setting has been cleared."
        );
    }
}

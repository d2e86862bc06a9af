//! Knockout use case
//!
//! A one-shot suspension applied directly by a moderator, without a vote.

use crate::config::TribunalConfig;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::platform::{ModerationPlatform, PlatformError};
use crate::ports::settings_repository::{SettingsError, SettingsRepository};
use crate::use_cases::error_kind::ErrorKind;
use crate::use_cases::shared::{announcement_channel, can_moderate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tribunal_domain::{
    AnnouncementTemplate, ChannelId, CommunityId, MemberId, MessageRef, OutgoingMessage,
};

#[derive(Error, Debug)]
pub enum KnockoutError {
    #[error("You can't knock out a bot!")]
    TargetIsBot,

    #[error("You can't knock out an admin!")]
    TargetIsAdministrator,

    #[error(
        "You do not have permission to do this. Only admins or users with the required role can knock out members."
    )]
    MissingPermission,

    #[error("There was an error trying to knock out the member: {0}")]
    Platform(#[from] PlatformError),

    #[error("Could not load community settings: {0}")]
    Settings(#[from] SettingsError),
}

impl KnockoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KnockoutError::TargetIsBot
            | KnockoutError::TargetIsAdministrator
            | KnockoutError::MissingPermission => ErrorKind::Validation,
            KnockoutError::Platform(_) | KnockoutError::Settings(_) => ErrorKind::ExternalAction,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KnockoutInput {
    pub community: CommunityId,
    pub origin_channel: ChannelId,
    pub actor: MemberId,
    pub target: MemberId,
}

pub struct KnockoutUseCase<P: ModerationPlatform, S: SettingsRepository> {
    platform: Arc<P>,
    settings: Arc<S>,
    audit: Arc<dyn AuditLogger>,
    config: TribunalConfig,
}

impl<P: ModerationPlatform, S: SettingsRepository> KnockoutUseCase<P, S> {
    pub fn new(platform: Arc<P>, settings: Arc<S>) -> Self {
        Self {
            platform,
            settings,
            audit: Arc::new(NoAuditLogger),
            config: TribunalConfig::default(),
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_config(mut self, config: TribunalConfig) -> Self {
        self.config = config;
        self
    }

    /// Suspend a member and post a public notice
    ///
    /// Returns the notice when it could be published.
    pub async fn knock_out(
        &self,
        input: KnockoutInput,
    ) -> Result<Option<MessageRef>, KnockoutError> {
        let target = self
            .platform
            .fetch_member(input.community, input.target)
            .await?;
        if target.is_bot {
            return Err(KnockoutError::TargetIsBot);
        }
        if target.is_administrator {
            return Err(KnockoutError::TargetIsAdministrator);
        }

        let settings = self.settings.load(input.community).await?;
        let actor = self
            .platform
            .fetch_member(input.community, input.actor)
            .await?;
        if !can_moderate(&actor, &settings) {
            return Err(KnockoutError::MissingPermission);
        }

        let reason = format!(
            "{} knocked out {} with a brick.",
            actor.display_name, target.display_name
        );
        self.platform
            .timeout_member(
                input.community,
                input.target,
                self.config.knockout_timeout,
                &reason,
            )
            .await?;
        info!("{} knocked out {} in community {}", input.actor, input.target, input.community);
        self.audit.log(AuditEvent::new(
            "knockout",
            serde_json::json!({
                "community": input.community,
                "target": input.target,
                "actor": input.actor,
                "duration_secs": self.config.knockout_timeout.as_secs(),
            }),
        ));

        let channel = announcement_channel(
            self.platform.as_ref(),
            input.community,
            &settings,
            input.origin_channel,
        )
        .await;
        let notice = OutgoingMessage::text(AnnouncementTemplate::knockout_notice(
            input.target,
            input.actor,
            self.config.knockout_timeout,
        ));
        match self.platform.send_message(channel, &notice).await {
            Ok(message) => Ok(Some(message)),
            Err(e) => {
                warn!("Could not announce knockout of {}: {}", input.target, e);
                Ok(None)
            }
        }
    }
}

//! Starting an accusation.

use super::types::{AccusationError, AccusationStarted, StartAccusationInput};
use super::{ACCUSATION_TIMEOUT_REASON, AccusationUseCase};
use crate::ports::platform::ModerationPlatform;
use crate::ports::settings_repository::SettingsRepository;
use crate::sessions::ResolutionTimer;
use crate::use_cases::shared::{announcement_channel, can_moderate};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use tribunal_domain::{
    AnnouncementTemplate, MessageRef, OutgoingMessage, Reason, Session, SessionId, SessionKey,
    VoteWindow,
};

impl<P, S> AccusationUseCase<P, S>
where
    P: ModerationPlatform + 'static,
    S: SettingsRepository + 'static,
{
    /// Open a vote against a member
    ///
    /// Checks run in a fixed order and the first failure wins: input,
    /// target is this bot, target is a bot, target is an administrator,
    /// accuser lacks the moderation capability, a vote is already active.
    /// Nothing is mutated when a check fails.
    pub async fn start_accusation(
        self: &Arc<Self>,
        input: StartAccusationInput,
    ) -> Result<AccusationStarted, AccusationError> {
        let reason = Reason::new(&input.reason)?;
        let window = VoteWindow::new(input.duration_minutes, self.config.max_duration_minutes)?;
        let key = SessionKey::new(input.community, input.target);

        if input.target == self.platform.self_id() {
            return Err(AccusationError::TargetIsSelf);
        }

        let target = self
            .platform
            .fetch_member(input.community, input.target)
            .await?;
        if target.is_bot {
            return Err(AccusationError::TargetIsBot);
        }
        if target.is_administrator {
            return Err(AccusationError::TargetIsAdministrator);
        }

        let settings = self.settings.load(input.community).await?;
        let accuser = self
            .platform
            .fetch_member(input.community, input.accuser)
            .await?;
        if !can_moderate(&accuser, &settings) {
            return Err(AccusationError::MissingPermission);
        }

        if self.store.contains(&key) {
            return Err(AccusationError::AlreadyActive(input.target));
        }

        self.platform
            .timeout_member(
                input.community,
                input.target,
                window.as_std(),
                ACCUSATION_TIMEOUT_REASON,
            )
            .await?;

        let session = Session::new(key, input.accuser, reason, window, Utc::now());
        let id = session.id;
        let ends_at = session.ends_at;
        let prompt_text = AnnouncementTemplate::accusation_prompt(
            input.accuser,
            input.target,
            session.reason.as_str(),
            ends_at,
        );

        // Lost a race against a concurrent start; the suspension is harmless
        self.store
            .create(session)
            .map_err(|_| AccusationError::AlreadyActive(input.target))?;

        let channel = announcement_channel(
            self.platform.as_ref(),
            input.community,
            &settings,
            input.origin_channel,
        )
        .await;
        let message = OutgoingMessage::text(prompt_text).with_vote_controls(input.target);

        let prompt = match self.platform.send_message(channel, &message).await {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Could not publish accusation prompt for {}: {}", key, e);
                self.abort_start(key, id).await;
                return Err(e.into());
            }
        };

        // The session may have been cancelled, and even replaced by a new
        // accusation, while the prompt was being published
        let attached = self
            .store
            .with_instance(&key, id, |s| s.attach_prompt(prompt))
            .unwrap_or(false);
        if !attached {
            info!("Session {} {} ended before its prompt was attached", key, id);
            self.discard_prompt(key, prompt).await;
            return Err(AccusationError::NoActiveSession(input.target));
        }

        let this = Arc::clone(self);
        let timer = ResolutionTimer::arm(window.as_std(), move || async move {
            this.resolve_instance(key, id).await;
        });
        if let Err(timer) = self.store.attach_timer(&key, id, timer) {
            timer.disarm();
            info!("Session {} {} ended before its timer was armed", key, id);
            self.discard_prompt(key, prompt).await;
            return Err(AccusationError::NoActiveSession(input.target));
        }

        info!(
            "Accusation against {} in community {} started by {} for {} minutes",
            input.target,
            input.community,
            input.accuser,
            window.minutes()
        );
        self.audit(
            "accusation_started",
            serde_json::json!({
                "community": input.community,
                "target": input.target,
                "accuser": input.accuser,
                "reason": input.reason.trim(),
                "duration_minutes": window.minutes(),
                "ends_at": ends_at.to_rfc3339(),
            }),
        );

        Ok(AccusationStarted {
            key,
            prompt,
            ends_at,
        })
    }

    /// Undo a start whose prompt could not be published
    async fn abort_start(&self, key: SessionKey, id: SessionId) {
        if self.store.retire_instance(&key, id).is_none() {
            return;
        }
        if let Err(e) = self.platform.clear_timeout(key.community, key.target).await {
            warn!("Could not lift suspension of {} after failed start: {}", key.target, e);
        }
    }

    /// Remove a prompt whose session is gone, so no live controls remain
    async fn discard_prompt(&self, key: SessionKey, prompt: MessageRef) {
        if let Err(e) = self.platform.delete_message(prompt).await {
            warn!("Could not delete orphaned prompt for {}: {}", key, e);
        }
    }
}

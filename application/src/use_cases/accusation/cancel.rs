//! Stopping an accusation before its window elapses.

use super::AccusationUseCase;
use super::types::{AccusationCancelled, AccusationError, CancelAccusationInput};
use crate::ports::platform::ModerationPlatform;
use crate::ports::settings_repository::SettingsRepository;
use crate::use_cases::shared::{announcement_channel, can_moderate};
use chrono::Utc;
use tracing::{info, warn};
use tribunal_domain::{AnnouncementTemplate, OutgoingMessage, SessionKey};

impl<P, S> AccusationUseCase<P, S>
where
    P: ModerationPlatform + 'static,
    S: SettingsRepository + 'static,
{
    /// Stop an active vote without enforcing anything
    ///
    /// Authorization matches [`start_accusation`](Self::start_accusation).
    /// Claiming the session disarms its timer; if the timer already claimed
    /// it, this reports [`AccusationError::NoActiveSession`].
    pub async fn cancel_accusation(
        &self,
        input: CancelAccusationInput,
    ) -> Result<AccusationCancelled, AccusationError> {
        let key = SessionKey::new(input.community, input.target);

        let settings = self.settings.load(input.community).await?;
        let actor = self
            .platform
            .fetch_member(input.community, input.actor)
            .await?;
        if !can_moderate(&actor, &settings) {
            return Err(AccusationError::MissingPermission);
        }

        let mut session = self
            .store
            .retire(&key)
            .ok_or(AccusationError::NoActiveSession(input.target))?;
        session.cancel();

        for message in [session.prompt(), session.tally()].into_iter().flatten() {
            if let Err(e) = self.platform.delete_message(message).await {
                warn!("Could not delete message {} for {}: {}", message.message, key, e);
            }
        }

        let timeout_lifted = match self
            .platform
            .fetch_member(input.community, input.target)
            .await
        {
            Ok(target) if target.is_timed_out(Utc::now()) => {
                match self
                    .platform
                    .clear_timeout(input.community, input.target)
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Could not lift suspension of {}: {}", input.target, e);
                        false
                    }
                }
            }
            Ok(_) => false,
            Err(e) => {
                warn!("Could not look up {} to lift suspension: {}", input.target, e);
                false
            }
        };

        let channel = announcement_channel(
            self.platform.as_ref(),
            input.community,
            &settings,
            input.origin_channel,
        )
        .await;
        let announcement = match self
            .platform
            .send_message(
                channel,
                &OutgoingMessage::text(AnnouncementTemplate::cancellation_notice(input.target)),
            )
            .await
        {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("Could not announce cancellation for {}: {}", key, e);
                None
            }
        };

        info!("Vote on {} cancelled by {}", key, input.actor);
        self.audit(
            "vote_cancelled",
            serde_json::json!({
                "community": input.community,
                "target": input.target,
                "actor": input.actor,
                "counts": session.ledger().counts(),
                "timeout_lifted": timeout_lifted,
            }),
        );

        Ok(AccusationCancelled {
            key,
            timeout_lifted,
            announcement,
        })
    }
}

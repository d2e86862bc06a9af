//! Resolving a vote once its window elapses.

use super::AccusationUseCase;
use super::types::Resolution;
use crate::ports::platform::{ModerationPlatform, PlatformError};
use crate::ports::settings_repository::SettingsRepository;
use tracing::{error, info, warn};
use tribunal_domain::{
    AnnouncementTemplate, OutgoingMessage, Outcome, Session, SessionId, SessionKey,
};

const TIMEOUT_BY_VOTE: &str = "Timeout by vote";
const KICKED_BY_VOTE: &str = "Kicked by vote";
const BANNED_BY_VOTE: &str = "Banned by vote";

impl<P, S> AccusationUseCase<P, S>
where
    P: ModerationPlatform + 'static,
    S: SettingsRepository + 'static,
{
    /// Close a vote, enforce the winning outcome and replace the prompt
    ///
    /// Returns `None` when the session was already claimed by a
    /// cancellation. The session leaves the store before any platform
    /// call, so a failed enforcement never leaves it behind.
    pub async fn resolve(&self, key: SessionKey) -> Option<Resolution> {
        let session = self.store.retire(&key)?;
        Some(self.close(session).await)
    }

    /// Resolve session instance `id` only; a successor under the same key
    /// is left alone
    pub(super) async fn resolve_instance(
        &self,
        key: SessionKey,
        id: SessionId,
    ) -> Option<Resolution> {
        let session = self.store.retire_instance(&key, id)?;
        Some(self.close(session).await)
    }

    async fn close(&self, mut session: Session) -> Resolution {
        let key = session.key;
        let outcome = session.resolve();
        let counts = *session.ledger().counts();

        info!(
            "Vote on {} closed: {} ({})",
            key,
            outcome,
            AnnouncementTemplate::vote_summary(&counts)
        );

        let enforced = match self.enforce(key, outcome).await {
            Ok(()) => true,
            Err(e) => {
                error!("Could not enforce {} on {}: {}", outcome, key.target, e);
                false
            }
        };

        let community_name = match self.platform.community_name(key.community).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Could not look up name of community {}: {}", key.community, e);
                "the community".to_string()
            }
        };

        let text = AnnouncementTemplate::resolution(
            key.target,
            &community_name,
            outcome,
            &counts,
            self.config.penalty_timeout,
            enforced,
        );
        if let Some(prompt) = session.prompt() {
            // Plain text without controls closes the vote visually
            if let Err(e) = self
                .platform
                .edit_message(prompt, &OutgoingMessage::text(text))
                .await
            {
                warn!("Could not update prompt for {}: {}", key, e);
            }
        }

        self.audit(
            "vote_resolved",
            serde_json::json!({
                "community": key.community,
                "target": key.target,
                "outcome": outcome,
                "counts": counts,
                "voters": session.ledger().voter_count(),
                "enforced": enforced,
            }),
        );

        Resolution {
            key,
            outcome,
            counts,
            enforced,
        }
    }

    async fn enforce(&self, key: SessionKey, outcome: Outcome) -> Result<(), PlatformError> {
        match outcome {
            Outcome::Stay => Ok(()),
            Outcome::Timeout => {
                self.platform
                    .timeout_member(
                        key.community,
                        key.target,
                        self.config.penalty_timeout,
                        TIMEOUT_BY_VOTE,
                    )
                    .await
            }
            Outcome::Kick => {
                self.platform
                    .kick_member(key.community, key.target, KICKED_BY_VOTE)
                    .await
            }
            Outcome::Ban => {
                self.platform
                    .ban_member(key.community, key.target, BANNED_BY_VOTE)
                    .await
            }
        }
    }
}

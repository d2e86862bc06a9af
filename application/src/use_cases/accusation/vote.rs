//! Casting votes.

use super::AccusationUseCase;
use super::types::{RecordedVote, VoteError};
use crate::ports::platform::ModerationPlatform;
use crate::ports::settings_repository::SettingsRepository;
use std::sync::Arc;
use tracing::{debug, error, warn};
use tribunal_domain::{
    AnnouncementTemplate, CastReceipt, CommunityId, ControlId, MemberId, OutgoingMessage,
    SessionKey,
};

impl<P, S> AccusationUseCase<P, S>
where
    P: ModerationPlatform + 'static,
    S: SettingsRepository + 'static,
{
    /// Handle an activated vote control
    ///
    /// Returns the receipt for the voter's acknowledgement as soon as the
    /// ledger is updated; the tally display is refreshed by a spawned task.
    /// Must be called from within a tokio runtime.
    pub fn cast_vote(
        self: &Arc<Self>,
        community: CommunityId,
        control_id: &str,
        voter: MemberId,
    ) -> Result<CastReceipt, VoteError> {
        let recorded = self.record_vote(community, control_id, voter)?;
        let receipt = recorded.receipt;

        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.publish_tally(recorded).await;
        });

        Ok(receipt)
    }

    /// Update the ledger for an activated vote control
    ///
    /// The ledger update and the tally snapshot are taken in one store call.
    pub fn record_vote(
        &self,
        community: CommunityId,
        control_id: &str,
        voter: MemberId,
    ) -> Result<RecordedVote, VoteError> {
        let control: ControlId = control_id.parse().map_err(|e| {
            error!("Received unrecognized vote control {:?}", control_id);
            VoteError::MalformedControl(e)
        })?;
        let key = SessionKey::new(community, control.target);

        let (session, receipt, tally, revision) = self
            .store
            .with_session(&key, |session| {
                session.cast(voter, control.outcome).map(|receipt| {
                    let tally = AnnouncementTemplate::tally_table(key.target, session.ledger());
                    (session.id, receipt, tally, session.revision())
                })
            })
            .flatten()
            .ok_or(VoteError::SessionClosed)?;

        debug!(
            "{} voted {} on {} (previous: {:?})",
            voter, receipt.outcome, key, receipt.previous
        );
        self.audit(
            "vote_cast",
            serde_json::json!({
                "community": community,
                "target": key.target,
                "voter": voter,
                "outcome": receipt.outcome,
                "previous": receipt.previous,
            }),
        );

        Ok(RecordedVote {
            key,
            session,
            receipt,
            tally,
            revision,
        })
    }

    /// Replace the session's tally display with the vote's snapshot
    ///
    /// Best effort: a missing destination or a failed call only logs.
    pub async fn publish_tally(&self, vote: RecordedVote) {
        let key = vote.key;
        let settings = match self.settings.load(key.community).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not load settings for community {}: {}", key.community, e);
                return;
            }
        };

        let Some(channel) = settings.tally_channel else {
            debug!(
                "No tally channel set for community {}, skipping tally",
                key.community
            );
            return;
        };

        match self.platform.channel_exists(key.community, channel).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    "Configured tally channel {} for community {} not found",
                    channel, key.community
                );
                return;
            }
            Err(e) => {
                warn!("Could not check tally channel {}: {}", channel, e);
                return;
            }
        }

        let published = match self
            .platform
            .send_message(channel, &OutgoingMessage::text(vote.tally))
            .await
        {
            Ok(published) => published,
            Err(e) => {
                warn!("Could not publish tally for {}: {}", key, e);
                return;
            }
        };

        // Each publisher deletes whatever lost, so at most one tally survives
        let stale = match self.store.with_instance(&key, vote.session, |s| {
            s.replace_tally(published, vote.revision)
        }) {
            Some(previous) => previous,
            None => {
                debug!("Session {} ended while its tally was published", key);
                Some(published)
            }
        };

        if let Some(stale) = stale
            && let Err(e) = self.platform.delete_message(stale).await
        {
            warn!("Could not delete stale tally for {}: {}", key, e);
        }
    }
}

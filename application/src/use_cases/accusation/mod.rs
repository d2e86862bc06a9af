//! Accusation use case
//!
//! Runs community votes against accused members:
//!
//! | Step | Entry point | Suspends? |
//! |------|-------------|-----------|
//! | Start (validate, suspend, prompt, arm timer) | [`AccusationUseCase::start_accusation`] | yes |
//! | Vote (ledger update, acknowledgement) | [`AccusationUseCase::record_vote`] | no |
//! | Vote (tally display) | [`AccusationUseCase::publish_tally`] | yes |
//! | Resolve (timer fired) | [`AccusationUseCase::resolve`] | yes, after claiming |
//! | Cancel | [`AccusationUseCase::cancel_accusation`] | yes, after claiming |
//!
//! Every mutation of a session happens inside a synchronous
//! [`SessionStore`] call. Terminal transitions claim the session with
//! [`SessionStore::retire`] before any platform I/O, so a resolution and a
//! cancellation racing each other can never both proceed.

mod cancel;
mod resolve;
mod start;
mod types;
mod vote;

pub use types::{
    AccusationCancelled, AccusationError, AccusationStarted, CancelAccusationInput, RecordedVote,
    Resolution, StartAccusationInput, VoteError,
};

use crate::config::TribunalConfig;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::platform::ModerationPlatform;
use crate::ports::settings_repository::SettingsRepository;
use crate::sessions::SessionStore;
use std::sync::Arc;
use tribunal_domain::{CommunityId, Session, SessionKey};

/// Audit reason attached to the suspension applied while a vote runs
pub const ACCUSATION_TIMEOUT_REASON: &str = "Accused of misconduct";

/// Use case for community moderation votes
pub struct AccusationUseCase<P: ModerationPlatform + 'static, S: SettingsRepository + 'static> {
    pub(super) platform: Arc<P>,
    pub(super) settings: Arc<S>,
    pub(super) store: Arc<SessionStore>,
    pub(super) audit: Arc<dyn AuditLogger>,
    pub(super) config: TribunalConfig,
}

impl<P: ModerationPlatform + 'static, S: SettingsRepository + 'static> AccusationUseCase<P, S> {
    pub fn new(platform: Arc<P>, settings: Arc<S>, store: Arc<SessionStore>) -> Self {
        Self {
            platform,
            settings,
            store,
            audit: Arc::new(NoAuditLogger),
            config: TribunalConfig::default(),
        }
    }

    /// Set an audit logger for moderation events
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_config(mut self, config: TribunalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TribunalConfig {
        &self.config
    }

    /// Snapshot of an active session
    pub fn session(&self, key: &SessionKey) -> Option<Session> {
        self.store.get(key)
    }

    /// Snapshots of all active sessions in a community
    pub fn active_sessions(&self, community: CommunityId) -> Vec<Session> {
        self.store
            .active_in(community)
            .iter()
            .filter_map(|key| self.store.get(key))
            .collect()
    }

    pub(super) fn audit(&self, event_type: &'static str, payload: serde_json::Value) {
        self.audit.log(AuditEvent::new(event_type, payload));
    }
}

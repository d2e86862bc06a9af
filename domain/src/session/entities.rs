//! Accusation session entity

use super::value_objects::{Reason, SessionId, SessionKey, VoteWindow};
use crate::core::ids::{MemberId, MessageRef};
use crate::vote::{CastReceipt, Outcome, VoteLedger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a session
///
/// `Resolved` and `Cancelled` are terminal. A session that reaches either
/// state has already been removed from the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Resolved,
    Cancelled,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Active => write!(f, "Active"),
            SessionState::Resolved => write!(f, "Resolved"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// One community vote against one accused member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub key: SessionKey,
    pub accuser: MemberId,
    pub reason: Reason,
    pub window: VoteWindow,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    ledger: VoteLedger,
    prompt: Option<MessageRef>,
    tally: Option<MessageRef>,
    tally_revision: u64,
    revision: u64,
    state: SessionState,
}

impl Session {
    pub fn new(
        key: SessionKey,
        accuser: MemberId,
        reason: Reason,
        window: VoteWindow,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::next(),
            key,
            accuser,
            reason,
            window,
            started_at,
            ends_at: window.ends_at(started_at),
            ledger: VoteLedger::new(),
            prompt: None,
            tally: None,
            tally_revision: 0,
            revision: 0,
            state: SessionState::Active,
        }
    }

    pub fn target(&self) -> MemberId {
        self.key.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Record a vote; returns `None` once the session has left `Active`
    pub fn cast(&mut self, voter: MemberId, outcome: Outcome) -> Option<CastReceipt> {
        if !self.state.is_active() {
            return None;
        }
        self.revision += 1;
        Some(self.ledger.cast(voter, outcome))
    }

    /// Number of votes cast so far, counting changed votes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn prompt(&self) -> Option<MessageRef> {
        self.prompt
    }

    /// Record the public prompt. The prompt is published once; a second
    /// attach keeps the original reference and returns `false`.
    pub fn attach_prompt(&mut self, prompt: MessageRef) -> bool {
        if self.prompt.is_some() {
            return false;
        }
        self.prompt = Some(prompt);
        true
    }

    pub fn tally(&self) -> Option<MessageRef> {
        self.tally
    }

    /// Swap in a tally display rendered at `revision`
    ///
    /// Returns the message that should be deleted: the display it replaced,
    /// or `tally` itself when a newer snapshot is already shown.
    pub fn replace_tally(&mut self, tally: MessageRef, revision: u64) -> Option<MessageRef> {
        if revision < self.tally_revision {
            return Some(tally);
        }
        self.tally_revision = revision;
        self.tally.replace(tally)
    }

    /// Close the vote and return the winning outcome
    pub fn resolve(&mut self) -> Outcome {
        self.state = SessionState::Resolved;
        self.ledger.winner()
    }

    pub fn cancel(&mut self) {
        self.state = SessionState::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{ChannelId, CommunityId, MessageId};

    fn session() -> Session {
        Session::new(
            SessionKey::new(CommunityId::new(1), MemberId::new(2)),
            MemberId::new(3),
            Reason::new("spam").unwrap(),
            VoteWindow::new(5, 60).unwrap(),
            Utc::now(),
        )
    }

    fn message(id: u64) -> MessageRef {
        MessageRef::new(ChannelId::new(10), MessageId::new(id))
    }

    #[test]
    fn test_new_session_is_active_with_empty_ledger() {
        let s = session();
        assert!(s.state().is_active());
        assert!(s.ledger().is_empty());
        assert_eq!(s.ends_at - s.started_at, chrono::Duration::minutes(5));
    }

    #[test]
    fn test_sessions_on_same_key_have_distinct_ids() {
        let first = session();
        let second = session();
        assert_eq!(first.key, second.key);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_prompt_attached_once() {
        let mut s = session();
        assert!(s.attach_prompt(message(1)));
        assert!(!s.attach_prompt(message(2)));
        assert_eq!(s.prompt(), Some(message(1)));
    }

    #[test]
    fn test_replace_tally_returns_previous() {
        let mut s = session();
        assert_eq!(s.replace_tally(message(1), 1), None);
        assert_eq!(s.replace_tally(message(2), 2), Some(message(1)));
        assert_eq!(s.tally(), Some(message(2)));
    }

    #[test]
    fn test_older_tally_does_not_displace_newer() {
        let mut s = session();
        assert_eq!(s.replace_tally(message(2), 2), None);
        assert_eq!(s.replace_tally(message(1), 1), Some(message(1)));
        assert_eq!(s.tally(), Some(message(2)));
    }

    #[test]
    fn test_revision_counts_every_cast() {
        let mut s = session();
        s.cast(MemberId::new(4), Outcome::Kick);
        s.cast(MemberId::new(4), Outcome::Stay);
        assert_eq!(s.revision(), 2);
        s.cancel();
        s.cast(MemberId::new(5), Outcome::Ban);
        assert_eq!(s.revision(), 2);
    }

    #[test]
    fn test_resolve_closes_voting() {
        let mut s = session();
        s.cast(MemberId::new(4), Outcome::Kick);
        assert_eq!(s.resolve(), Outcome::Kick);
        assert_eq!(s.state(), SessionState::Resolved);
        assert!(s.cast(MemberId::new(5), Outcome::Ban).is_none());
        assert_eq!(s.ledger().counts().total(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut s = session();
        s.cancel();
        assert_eq!(s.state(), SessionState::Cancelled);
        assert!(s.cast(MemberId::new(4), Outcome::Kick).is_none());
    }
}

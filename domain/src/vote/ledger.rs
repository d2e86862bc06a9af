//! Vote ledger: counts, standing votes and per-voter history
//!
//! The ledger is plain data with synchronous mutation only. Callers apply a
//! whole vote with a single [`VoteLedger::cast`] call, so there is no point
//! where another reader can observe a half-applied vote.

use super::outcome::Outcome;
use crate::core::ids::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of standing votes per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub stay: u32,
    pub timeout: u32,
    pub kick: u32,
    pub ban: u32,
}

impl OutcomeCounts {
    pub fn new(stay: u32, timeout: u32, kick: u32, ban: u32) -> Self {
        Self {
            stay,
            timeout,
            kick,
            ban,
        }
    }

    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Stay => self.stay,
            Outcome::Timeout => self.timeout,
            Outcome::Kick => self.kick,
            Outcome::Ban => self.ban,
        }
    }

    fn slot(&mut self, outcome: Outcome) -> &mut u32 {
        match outcome {
            Outcome::Stay => &mut self.stay,
            Outcome::Timeout => &mut self.timeout,
            Outcome::Kick => &mut self.kick,
            Outcome::Ban => &mut self.ban,
        }
    }

    fn increment(&mut self, outcome: Outcome) {
        *self.slot(outcome) += 1;
    }

    fn decrement(&mut self, outcome: Outcome) {
        let slot = self.slot(outcome);
        *slot = slot.saturating_sub(1);
    }

    /// Sum over all outcomes
    pub fn total(&self) -> u32 {
        self.stay + self.timeout + self.kick + self.ban
    }

    /// Iterate `(outcome, count)` in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u32)> + '_ {
        Outcome::ALL.into_iter().map(|o| (o, self.get(o)))
    }

    /// The winning outcome
    ///
    /// The first outcome in priority order whose count equals the maximum.
    /// Ties therefore go to the least severe outcome, and an empty ballot
    /// box resolves to [`Outcome::Stay`].
    ///
    /// # Example
    ///
    /// ```
    /// use tribunal_domain::vote::{Outcome, OutcomeCounts};
    ///
    /// assert_eq!(OutcomeCounts::new(2, 2, 0, 0).winner(), Outcome::Stay);
    /// assert_eq!(OutcomeCounts::new(0, 1, 1, 0).winner(), Outcome::Timeout);
    /// assert_eq!(OutcomeCounts::new(1, 0, 2, 0).winner(), Outcome::Kick);
    /// ```
    pub fn winner(&self) -> Outcome {
        let max = self.iter().map(|(_, count)| count).max().unwrap_or(0);
        self.iter()
            .find(|(_, count)| *count == max)
            .map(|(outcome, _)| outcome)
            .unwrap_or(Outcome::Stay)
    }
}

/// One cast in a voter's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub outcome: Outcome,
    /// Set once the voter cast again after this entry
    pub superseded: bool,
}

/// Everything one voter has cast, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterHistory {
    pub voter: MemberId,
    pub entries: Vec<HistoryEntry>,
}

impl VoterHistory {
    /// The most recent entry (the standing vote)
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

/// What a single cast changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastReceipt {
    pub voter: MemberId,
    pub outcome: Outcome,
    /// The standing vote this cast replaced, if any
    pub previous: Option<Outcome>,
}

impl CastReceipt {
    pub fn is_change(&self) -> bool {
        self.previous.is_some()
    }
}

/// Tally and audit trail for one accusation
///
/// # Example
///
/// ```
/// use tribunal_domain::vote::{Outcome, VoteLedger};
/// use tribunal_domain::MemberId;
///
/// let mut ledger = VoteLedger::new();
/// let alice = MemberId::new(1);
///
/// ledger.cast(alice, Outcome::Ban);
/// let receipt = ledger.cast(alice, Outcome::Stay);
///
/// assert_eq!(receipt.previous, Some(Outcome::Ban));
/// assert_eq!(ledger.counts().ban, 0);
/// assert_eq!(ledger.counts().stay, 1);
/// assert_eq!(ledger.history()[0].entries.len(), 2);
/// assert!(ledger.history()[0].entries[0].superseded);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    counts: OutcomeCounts,
    standing: HashMap<MemberId, Outcome>,
    /// Ordered by each voter's first cast
    history: Vec<VoterHistory>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one vote
    ///
    /// A previous standing vote is withdrawn from the counts and its history
    /// entry marked superseded before the new choice is recorded.
    pub fn cast(&mut self, voter: MemberId, outcome: Outcome) -> CastReceipt {
        let previous = self.standing.insert(voter, outcome);

        if let Some(previous) = previous {
            self.counts.decrement(previous);
        }
        self.counts.increment(outcome);

        let entry = HistoryEntry {
            outcome,
            superseded: false,
        };
        match self.history.iter_mut().find(|h| h.voter == voter) {
            Some(history) => {
                if let Some(last) = history.entries.last_mut() {
                    last.superseded = true;
                }
                history.entries.push(entry);
            }
            None => self.history.push(VoterHistory {
                voter,
                entries: vec![entry],
            }),
        }

        CastReceipt {
            voter,
            outcome,
            previous,
        }
    }

    pub fn counts(&self) -> &OutcomeCounts {
        &self.counts
    }

    /// The standing vote of a voter
    pub fn standing(&self, voter: MemberId) -> Option<Outcome> {
        self.standing.get(&voter).copied()
    }

    /// Number of voters with a standing vote
    pub fn voter_count(&self) -> usize {
        self.standing.len()
    }

    pub fn history(&self) -> &[VoterHistory] {
        &self.history
    }

    pub fn history_of(&self, voter: MemberId) -> Option<&VoterHistory> {
        self.history.iter().find(|h| h.voter == voter)
    }

    pub fn winner(&self) -> Outcome {
        self.counts.winner()
    }

    pub fn is_empty(&self) -> bool {
        self.standing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(id: u64) -> MemberId {
        MemberId::new(id)
    }

    /// Check the ledger's structural invariants
    fn assert_consistent(ledger: &VoteLedger) {
        assert_eq!(ledger.counts().total() as usize, ledger.voter_count());
        for history in ledger.history() {
            let latest = history.latest().expect("history is never empty");
            assert!(!latest.superseded);
            assert_eq!(Some(latest.outcome), ledger.standing(history.voter));
            let (last, earlier) = history.entries.split_last().unwrap();
            assert!(!last.superseded);
            assert!(earlier.iter().all(|e| e.superseded));
        }
        for outcome in Outcome::ALL {
            let standing = ledger
                .history()
                .iter()
                .filter(|h| ledger.standing(h.voter) == Some(outcome))
                .count();
            assert_eq!(ledger.counts().get(outcome) as usize, standing);
        }
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = VoteLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(*ledger.counts(), OutcomeCounts::default());
        assert_eq!(ledger.winner(), Outcome::Stay);
    }

    #[test]
    fn test_first_vote() {
        let mut ledger = VoteLedger::new();
        let receipt = ledger.cast(voter(1), Outcome::Kick);

        assert!(!receipt.is_change());
        assert_eq!(ledger.counts().kick, 1);
        assert_eq!(ledger.standing(voter(1)), Some(Outcome::Kick));
        assert_consistent(&ledger);
    }

    #[test]
    fn test_revote_moves_count() {
        let mut ledger = VoteLedger::new();
        ledger.cast(voter(1), Outcome::Ban);
        let receipt = ledger.cast(voter(1), Outcome::Stay);

        assert_eq!(receipt.previous, Some(Outcome::Ban));
        assert_eq!(*ledger.counts(), OutcomeCounts::new(1, 0, 0, 0));

        let history = ledger.history_of(voter(1)).unwrap();
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[0].outcome, Outcome::Ban);
        assert!(history.entries[0].superseded);
        assert_eq!(history.entries[1].outcome, Outcome::Stay);
        assert!(!history.entries[1].superseded);
        assert_consistent(&ledger);
    }

    #[test]
    fn test_superseded_marked_once() {
        let mut ledger = VoteLedger::new();
        ledger.cast(voter(1), Outcome::Ban);
        ledger.cast(voter(1), Outcome::Kick);
        ledger.cast(voter(1), Outcome::Timeout);

        let history = ledger.history_of(voter(1)).unwrap();
        let superseded: Vec<_> = history.entries.iter().map(|e| e.superseded).collect();
        assert_eq!(superseded, vec![true, true, false]);
        assert_eq!(ledger.counts().total(), 1);
    }

    #[test]
    fn test_revote_same_outcome_keeps_total() {
        let mut ledger = VoteLedger::new();
        ledger.cast(voter(1), Outcome::Kick);
        ledger.cast(voter(1), Outcome::Kick);

        assert_eq!(ledger.counts().kick, 1);
        assert_eq!(ledger.history_of(voter(1)).unwrap().entries.len(), 2);
        assert_consistent(&ledger);
    }

    #[test]
    fn test_history_ordered_by_first_vote() {
        let mut ledger = VoteLedger::new();
        ledger.cast(voter(3), Outcome::Kick);
        ledger.cast(voter(1), Outcome::Stay);
        ledger.cast(voter(3), Outcome::Ban);

        let order: Vec<_> = ledger.history().iter().map(|h| h.voter).collect();
        assert_eq!(order, vec![voter(3), voter(1)]);
    }

    #[test]
    fn test_total_equals_distinct_voters_for_any_sequence() {
        // Deterministic LCG so the sequence is reproducible without extra crates
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 33) as usize
        };

        for _ in 0..50 {
            let mut ledger = VoteLedger::new();
            let mut seen = std::collections::HashSet::new();
            for _ in 0..200 {
                let v = voter((next() % 12) as u64);
                let outcome = Outcome::ALL[next() % 4];
                let before = ledger.counts().total();
                let receipt = ledger.cast(v, outcome);
                seen.insert(v);

                if receipt.is_change() {
                    assert_eq!(ledger.counts().total(), before);
                } else {
                    assert_eq!(ledger.counts().total(), before + 1);
                }
                assert_eq!(ledger.counts().total() as usize, seen.len());
            }
            assert_consistent(&ledger);
        }
    }

    #[test]
    fn test_tie_break_prefers_least_severe() {
        assert_eq!(OutcomeCounts::new(2, 2, 0, 0).winner(), Outcome::Stay);
        assert_eq!(OutcomeCounts::new(0, 1, 1, 0).winner(), Outcome::Timeout);
        assert_eq!(OutcomeCounts::new(0, 0, 3, 3).winner(), Outcome::Kick);
        assert_eq!(OutcomeCounts::new(0, 0, 0, 1).winner(), Outcome::Ban);
    }

    #[test]
    fn test_counts_iter_in_priority_order() {
        let counts = OutcomeCounts::new(1, 0, 2, 0);
        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (Outcome::Stay, 1),
                (Outcome::Timeout, 0),
                (Outcome::Kick, 2),
                (Outcome::Ban, 0)
            ]
        );
    }
}

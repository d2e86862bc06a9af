//! Community vote domain
//!
//! # Core Concepts
//!
//! ## Outcome
//! The four choices offered on every accusation: stay, timeout, kick, ban.
//! Their declaration order doubles as the tie-break priority.
//!
//! ## Ledger
//! Standing vote per voter, counts per outcome, and an append-only history
//! per voter in which every superseded cast is marked.
//!
//! ```text
//! voter A: BAN (changed) -> STAY          counts: stay 1
//! voter B: KICK                                   kick 1
//! ```

pub mod control;
pub mod ledger;
pub mod outcome;

pub use control::ControlId;
pub use ledger::{CastReceipt, HistoryEntry, OutcomeCounts, VoteLedger, VoterHistory};
pub use outcome::Outcome;

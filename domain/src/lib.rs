//! Domain layer for community-tribunal
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Accusation
//!
//! A moderator accuses a member; the community then votes on what happens
//! to them within a fixed window:
//!
//! - **Session**: the mutable record of one in-progress vote
//! - **Outcome**: stay, timeout, kick or ban
//! - **Ledger**: standing votes, counts and the per-voter change history
//!
//! ## Resolution
//!
//! When the window closes the outcome with the most votes wins. Ties go to
//! the least severe outcome.

pub mod announcement;
pub mod config;
pub mod core;
pub mod session;
pub mod vote;

// Re-export commonly used types
pub use announcement::{AnnouncementTemplate, Control, ControlStyle, OutgoingMessage};
pub use config::{CommunitySettings, SettingChange};
pub use core::{
    error::DomainError,
    ids::{ChannelId, CommunityId, MemberId, MessageId, MessageRef, RoleId},
};
pub use session::{Reason, Session, SessionId, SessionKey, SessionState, VoteWindow};
pub use vote::{
    CastReceipt, ControlId, HistoryEntry, Outcome, OutcomeCounts, VoteLedger, VoterHistory,
};

//! Accusation sessions
//!
//! A [`Session`] is the mutable record of one in-progress vote. It owns the
//! [`VoteLedger`](crate::vote::VoteLedger) and the references to the
//! messages published for it.
//!
//! ```text
//!            ┌──────── timer elapsed ────────► Resolved
//!  Active ───┤
//!            └──────── cancelled ────────────► Cancelled
//! ```

pub mod entities;
pub mod value_objects;

pub use entities::{Session, SessionState};
pub use value_objects::{Reason, SessionId, SessionKey, VoteWindow};

//! Active session bookkeeping
//!
//! - [`SessionStore`]: the registry of active sessions
//! - [`ResolutionTimer`]: the cancellable one-shot timer that resolves a vote

pub mod store;
pub mod timer;

pub use store::{SessionConflict, SessionStore};
pub use timer::ResolutionTimer;

//! Platform adapters.
//!
//! [`SimulatedPlatform`] is an in-memory community that implements the
//! [`ModerationPlatform`](tribunal_application::ModerationPlatform) and
//! [`MemberDirectory`](tribunal_application::MemberDirectory) ports and
//! reports everything it does to an
//! [`ActivityObserver`](tribunal_application::ActivityObserver).

mod simulated;

pub use simulated::SimulatedPlatform;

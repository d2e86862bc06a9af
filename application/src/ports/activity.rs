//! Platform activity port
//!
//! Defines the interface for observing what a platform adapter does:
//! messages published, edited and deleted, and moderation actions applied.

use chrono::{DateTime, Utc};
use tribunal_domain::{MessageRef, OutgoingMessage};

/// One action performed on the platform
///
/// Names are resolved by the adapter when the action happens, so an observer
/// can still show a member that was just kicked.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformActivity {
    MessageSent {
        channel: String,
        message: MessageRef,
        content: OutgoingMessage,
    },
    MessageEdited {
        channel: String,
        message: MessageRef,
        content: OutgoingMessage,
    },
    MessageDeleted {
        channel: String,
        message: MessageRef,
    },
    TimedOut {
        member: String,
        until: DateTime<Utc>,
        reason: String,
    },
    TimeoutCleared {
        member: String,
    },
    Kicked {
        member: String,
        reason: String,
    },
    Banned {
        member: String,
        reason: String,
    },
}

/// Callback for platform activity
///
/// Implementations live in the presentation layer. Called synchronously
/// from the adapter, possibly from a timer task.
pub trait ActivityObserver: Send + Sync {
    fn on_activity(&self, activity: &PlatformActivity);
}

/// No-op observer for when nobody is watching
pub struct NoActivityObserver;

impl ActivityObserver for NoActivityObserver {
    fn on_activity(&self, _activity: &PlatformActivity) {}
}

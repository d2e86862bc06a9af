//! Value objects for accusation sessions

use crate::core::error::DomainError;
use crate::core::ids::{CommunityId, MemberId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a session: at most one active session per key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub community: CommunityId,
    pub target: MemberId,
}

impl SessionKey {
    pub fn new(community: CommunityId, target: MemberId) -> Self {
        Self { community, target }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.community, self.target)
    }
}

/// Identity of one session instance
///
/// A target can be accused again once a vote ends, so the key alone does
/// not tell an old session from its successor. Every [`Session`] gets a
/// fresh id when it is created.
///
/// [`Session`]: super::Session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Mint an id no other session in this process has
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How long a vote runs, in whole minutes
///
/// # Example
///
/// ```
/// use tribunal_domain::session::VoteWindow;
///
/// let window = VoteWindow::new(15, 60).unwrap();
/// assert_eq!(window.as_std().as_secs(), 900);
/// assert!(VoteWindow::new(0, 60).is_err());
/// assert!(VoteWindow::new(61, 60).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWindow {
    minutes: u64,
}

impl VoteWindow {
    /// Validate a window against the configured maximum
    pub fn new(minutes: u64, max_minutes: u64) -> Result<Self, DomainError> {
        if minutes == 0 || minutes > max_minutes {
            return Err(DomainError::InvalidDuration { max: max_minutes });
        }
        Ok(Self { minutes })
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn as_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.minutes * 60)
    }

    /// Absolute end of a vote starting at `start`
    pub fn ends_at(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        start + Duration::minutes(self.minutes as i64)
    }
}

/// The free-text accusation reason (non-empty after trimming)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason(String);

impl Reason {
    pub fn new(reason: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = reason.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyReason);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

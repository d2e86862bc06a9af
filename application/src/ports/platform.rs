//! Moderation platform port
//!
//! Defines the interface to the chat platform: member lookup, message
//! publishing and the moderation primitives used to enforce outcomes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tribunal_domain::{ChannelId, CommunityId, MemberId, MessageRef, OutgoingMessage, RoleId};

/// Errors that can occur during platform operations
///
/// Every call may fail independently; callers log and continue wherever the
/// session bookkeeping must not be blocked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Message not found: {0}")]
    MessageNotFound(tribunal_domain::MessageId),

    #[error("Missing permissions: {0}")]
    Forbidden(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// What the platform knows about a member of a community
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub id: MemberId,
    pub display_name: String,
    /// Automated (non-human) account
    pub is_bot: bool,
    /// Holds the administrator capability
    pub is_administrator: bool,
    pub roles: Vec<RoleId>,
    /// End of the current communication suspension, if any
    pub timed_out_until: Option<DateTime<Utc>>,
}

impl MemberProfile {
    /// A plain human member with no roles
    pub fn new(id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_bot: false,
            is_administrator: false,
            roles: Vec::new(),
            timed_out_until: None,
        }
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }

    /// Whether a communication suspension is in effect at `now`
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.timed_out_until.is_some_and(|until| until > now)
    }
}

/// Gateway to the chat platform
///
/// This port defines how the application layer talks to the platform.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModerationPlatform: Send + Sync {
    /// The platform identity of this bot
    fn self_id(&self) -> MemberId;

    /// Display name of a community
    async fn community_name(&self, community: CommunityId) -> Result<String, PlatformError>;

    /// Look up a member of a community
    async fn fetch_member(
        &self,
        community: CommunityId,
        member: MemberId,
    ) -> Result<MemberProfile, PlatformError>;

    /// Whether a channel exists in a community
    async fn channel_exists(
        &self,
        community: CommunityId,
        channel: ChannelId,
    ) -> Result<bool, PlatformError>;

    /// Publish a message, returning its reference
    async fn send_message(
        &self,
        channel: ChannelId,
        message: &OutgoingMessage,
    ) -> Result<MessageRef, PlatformError>;

    /// Replace a message's content and controls
    async fn edit_message(
        &self,
        message: MessageRef,
        content: &OutgoingMessage,
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError>;

    /// Apply a timed communication suspension
    async fn timeout_member(
        &self,
        community: CommunityId,
        member: MemberId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Lift a communication suspension
    async fn clear_timeout(
        &self,
        community: CommunityId,
        member: MemberId,
    ) -> Result<(), PlatformError>;

    /// Remove a member from a community
    async fn kick_member(
        &self,
        community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Ban a member from a community
    async fn ban_member(
        &self,
        community: CommunityId,
        member: MemberId,
        reason: &str,
    ) -> Result<(), PlatformError>;
}

//! Input, output and error types for the accusation use case.

use crate::ports::platform::PlatformError;
use crate::ports::settings_repository::SettingsError;
use crate::use_cases::error_kind::ErrorKind;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tribunal_domain::{
    CastReceipt, ChannelId, CommunityId, DomainError, MemberId, MessageRef, Outcome,
    OutcomeCounts, SessionId, SessionKey,
};

/// Errors from starting or stopping an accusation
///
/// The `Display` text of each variant is the private reply shown to the
/// actor.
#[derive(Error, Debug)]
pub enum AccusationError {
    #[error("You can't accuse the bot!")]
    TargetIsSelf,

    #[error("You can't accuse other bots!")]
    TargetIsBot,

    #[error("You can't accuse admins!")]
    TargetIsAdministrator,

    #[error(
        "You do not have permission to do this. Only admins or users with the required role can start or stop a vote."
    )]
    MissingPermission,

    #[error("There is already an active vote on {}.", .0.mention())]
    AlreadyActive(MemberId),

    #[error("There is no active vote for {}.", .0.mention())]
    NoActiveSession(MemberId),

    #[error("{0}")]
    InvalidInput(#[from] DomainError),

    #[error("The platform rejected the request: {0}")]
    Platform(#[from] PlatformError),

    #[error("Could not load community settings: {0}")]
    Settings(#[from] SettingsError),
}

impl AccusationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccusationError::TargetIsSelf
            | AccusationError::TargetIsBot
            | AccusationError::TargetIsAdministrator
            | AccusationError::MissingPermission
            | AccusationError::InvalidInput(_) => ErrorKind::Validation,
            AccusationError::AlreadyActive(_) => ErrorKind::Conflict,
            AccusationError::NoActiveSession(_) => ErrorKind::NotFound,
            AccusationError::Platform(_) | AccusationError::Settings(_) => {
                ErrorKind::ExternalAction
            }
        }
    }
}

/// Errors from casting a vote
#[derive(Error, Debug)]
pub enum VoteError {
    #[error("This vote session is no longer active or does not exist.")]
    SessionClosed,

    #[error("Unrecognized vote control: {0}")]
    MalformedControl(DomainError),
}

impl VoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VoteError::SessionClosed => ErrorKind::NotFound,
            VoteError::MalformedControl(_) => ErrorKind::Validation,
        }
    }
}

/// Input for starting an accusation
#[derive(Debug, Clone)]
pub struct StartAccusationInput {
    pub community: CommunityId,
    /// Channel the command was run in (fallback for the prompt)
    pub origin_channel: ChannelId,
    pub accuser: MemberId,
    pub target: MemberId,
    pub reason: String,
    pub duration_minutes: u64,
}

/// A successfully started accusation
#[derive(Debug, Clone)]
pub struct AccusationStarted {
    pub key: SessionKey,
    pub prompt: MessageRef,
    pub ends_at: DateTime<Utc>,
}

/// Input for stopping an accusation
#[derive(Debug, Clone)]
pub struct CancelAccusationInput {
    pub community: CommunityId,
    pub origin_channel: ChannelId,
    pub actor: MemberId,
    pub target: MemberId,
}

/// A successfully cancelled accusation
#[derive(Debug, Clone)]
pub struct AccusationCancelled {
    pub key: SessionKey,
    /// Whether a suspension was in effect and got lifted
    pub timeout_lifted: bool,
    pub announcement: Option<MessageRef>,
}

/// A vote that is in the ledger but not yet on the tally display
#[derive(Debug, Clone)]
pub struct RecordedVote {
    pub key: SessionKey,
    /// The session instance the vote was cast in
    pub session: SessionId,
    pub receipt: CastReceipt,
    /// Tally table rendered in the same critical section as the vote
    pub tally: String,
    /// Session revision the tally was rendered at
    pub revision: u64,
}

/// A resolved vote
#[derive(Debug, Clone)]
pub struct Resolution {
    pub key: SessionKey,
    pub outcome: Outcome,
    pub counts: OutcomeCounts,
    /// Whether the enforcement call succeeded
    pub enforced: bool,
}

//! Application layer for community-tribunal
//!
//! This crate contains use cases, port definitions, the active session
//! registry and application configuration. It depends only on the domain
//! layer.

pub mod config;
pub mod ports;
pub mod sessions;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PLATFORM_MAX_TIMEOUT, PLATFORM_MAX_TIMEOUT_MINUTES, TribunalConfig};
pub use ports::{
    activity::{ActivityObserver, NoActivityObserver, PlatformActivity},
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    directory::MemberDirectory,
    platform::{MemberProfile, ModerationPlatform, PlatformError},
    settings_repository::{InMemorySettings, SettingsError, SettingsRepository},
};
pub use sessions::{ResolutionTimer, SessionConflict, SessionStore};
pub use use_cases::accusation::{
    ACCUSATION_TIMEOUT_REASON, AccusationCancelled, AccusationError, AccusationStarted,
    AccusationUseCase, CancelAccusationInput, RecordedVote, Resolution, StartAccusationInput,
    VoteError,
};
pub use use_cases::community_settings::{
    CommunitySettingsUseCase, SettingsCommandError, SettingsOverview, change_confirmation,
};
pub use use_cases::error_kind::ErrorKind;
pub use use_cases::knockout::{KnockoutError, KnockoutInput, KnockoutUseCase};

//! Vote outcomes
//!
//! The fixed set of choices a community can vote for, ordered from least to
//! most severe.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One of the four choices offered on an accusation prompt
///
/// The declaration order is the tie-break priority: when several outcomes
/// share the highest count, the earliest one wins.
///
/// # Example
///
/// ```
/// use tribunal_domain::vote::Outcome;
///
/// let outcome: Outcome = "kick".parse().unwrap();
/// assert_eq!(outcome, Outcome::Kick);
/// assert_eq!(outcome.label(), "Kick");
/// assert!(Outcome::Stay < Outcome::Ban);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The accused stays, no action taken
    Stay,
    /// A 24-hour communication suspension
    Timeout,
    /// Removal from the community
    Kick,
    /// Permanent ban from the community
    Ban,
}

impl Outcome {
    /// All outcomes in tie-break priority order
    pub const ALL: [Outcome; 4] = [Outcome::Stay, Outcome::Timeout, Outcome::Kick, Outcome::Ban];

    /// Wire name used in control ids and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Stay => "stay",
            Outcome::Timeout => "timeout",
            Outcome::Kick => "kick",
            Outcome::Ban => "ban",
        }
    }

    /// Button label shown on the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Stay => "Stay",
            Outcome::Timeout => "Timeout",
            Outcome::Kick => "Kick",
            Outcome::Ban => "Ban",
        }
    }

    /// Position in [`Outcome::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether enforcing this outcome touches the platform at all
    pub fn requires_enforcement(&self) -> bool {
        !matches!(self, Outcome::Stay)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stay" => Ok(Outcome::Stay),
            "timeout" => Ok(Outcome::Timeout),
            "kick" => Ok(Outcome::Kick),
            "ban" => Ok(Outcome::Ban),
            _ => Err(DomainError::UnknownOutcome(s.to_string())),
        }
    }
}

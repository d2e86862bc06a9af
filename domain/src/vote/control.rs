//! Interactive control identifiers
//!
//! Each button on an accusation prompt carries an id of the form
//! `<outcome>_<target-id>`, e.g. `kick_123456789`. The platform hands the id
//! back verbatim when the button is pressed.

use super::outcome::Outcome;
use crate::core::error::DomainError;
use crate::core::ids::MemberId;

/// Decoded control id: which outcome was chosen against which target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlId {
    pub outcome: Outcome,
    pub target: MemberId,
}

impl ControlId {
    pub fn new(outcome: Outcome, target: MemberId) -> Self {
        Self { outcome, target }
    }

    /// One control per outcome, in display order
    pub fn for_target(target: MemberId) -> [ControlId; 4] {
        Outcome::ALL.map(|outcome| ControlId::new(outcome, target))
    }

    /// Encode into the wire form
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.outcome.as_str(), self.target)
    }
}

impl std::str::FromStr for ControlId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedControlId(s.to_string());

        let (outcome, target) = s.split_once('_').ok_or_else(malformed)?;
        let outcome: Outcome = outcome.parse().map_err(|_| malformed())?;
        let target: MemberId = target.parse().map_err(|_| malformed())?;

        Ok(Self { outcome, target })
    }
}

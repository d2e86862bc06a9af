//! Outgoing message value objects

use crate::core::ids::MemberId;
use crate::vote::{ControlId, Outcome};
use serde::{Deserialize, Serialize};

/// Visual weight of an interactive control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStyle {
    Success,
    Primary,
    Secondary,
    Danger,
}

impl From<Outcome> for ControlStyle {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Stay => ControlStyle::Success,
            Outcome::Timeout => ControlStyle::Primary,
            Outcome::Kick => ControlStyle::Secondary,
            Outcome::Ban => ControlStyle::Danger,
        }
    }
}

/// A button attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Handed back verbatim when the control is activated
    pub id: String,
    pub label: String,
    pub style: ControlStyle,
}

impl From<ControlId> for Control {
    fn from(id: ControlId) -> Self {
        Self {
            id: id.encode(),
            label: id.outcome.label().to_string(),
            style: id.outcome.into(),
        }
    }
}

/// Message content plus optional controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub content: String,
    pub controls: Vec<Control>,
}

impl OutgoingMessage {
    /// Plain text, no controls
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            controls: Vec::new(),
        }
    }

    /// Attach the four vote controls for `target`
    pub fn with_vote_controls(mut self, target: MemberId) -> Self {
        self.controls = ControlId::for_target(target)
            .into_iter()
            .map(Control::from)
            .collect();
        self
    }

    pub fn has_controls(&self) -> bool {
        !self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_controls() {
        let msg = OutgoingMessage::text("vote!").with_vote_controls(MemberId::new(9));
        let ids: Vec<_> = msg.controls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["stay_9", "timeout_9", "kick_9", "ban_9"]);
        assert_eq!(msg.controls[3].style, ControlStyle::Danger);
        assert_eq!(msg.controls[0].label, "Stay");
    }

    #[test]
    fn test_text_has_no_controls() {
        assert!(!OutgoingMessage::text("hi").has_controls());
    }
}

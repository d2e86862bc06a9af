//! Message templates for the accusation flow

use crate::config::CommunitySettings;
use crate::core::ids::MemberId;
use crate::vote::{Outcome, OutcomeCounts, VoteLedger};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Templates for every message the tribunal publishes or replies with
pub struct AnnouncementTemplate;

impl AnnouncementTemplate {
    /// Human-readable absolute time, e.g. "October 1, 2024, 1:30 PM UTC"
    pub fn format_end_time(ends_at: DateTime<Utc>) -> String {
        ends_at.format("%B %-d, %Y, %-I:%M %p UTC").to_string()
    }

    /// Human-readable length, e.g. "24 hours" or "90 minutes"
    pub fn format_duration(duration: Duration) -> String {
        fn plural(n: u64, unit: &str) -> String {
            if n == 1 {
                format!("1 {}", unit)
            } else {
                format!("{} {}s", n, unit)
            }
        }

        let secs = duration.as_secs();
        if secs >= 3600 && secs % 3600 == 0 {
            plural(secs / 3600, "hour")
        } else if secs >= 60 && secs % 60 == 0 {
            plural(secs / 60, "minute")
        } else {
            plural(secs, "second")
        }
    }

    /// Public prompt opening a vote
    pub fn accusation_prompt(
        accuser: MemberId,
        target: MemberId,
        reason: &str,
        ends_at: DateTime<Utc>,
    ) -> String {
        format!(
            r#"Attention @everyone of the community! {} has been accused of "{}" by {}. Now it's up to the community to decide their fate. Cast your votes and have your say in what happens next.

The vote will end on **{}**."#,
            target.mention(),
            reason,
            accuser.mention(),
            Self::format_end_time(ends_at)
        )
    }

    /// Private acknowledgement of a recorded vote
    pub fn vote_recorded(outcome: Outcome) -> String {
        format!(
            "Your vote for **{}** has been cast!",
            outcome.as_str().to_uppercase()
        )
    }

    /// Full per-voter tally table
    ///
    /// Every cast is listed; the standing vote of each voter is bold and
    /// superseded casts carry a `(CHANGED)` marker.
    pub fn tally_table(target: MemberId, ledger: &VoteLedger) -> String {
        let mut table = format!("**Vote Results for {}**\n\n", target.mention());
        table.push_str("| **User** | **Vote** |\n");
        table.push_str("|:--------|:---------|\n");

        for history in ledger.history() {
            let voter = history.voter.mention();
            for entry in &history.entries {
                let name = entry.outcome.as_str().to_uppercase();
                if entry.superseded {
                    table.push_str(&format!("| {} | {} (CHANGED) |\n", voter, name));
                } else {
                    table.push_str(&format!("| {} | **{}** |\n", voter, name));
                }
            }
        }

        table
    }

    /// One-line numeric summary
    pub fn vote_summary(counts: &OutcomeCounts) -> String {
        let parts: Vec<String> = counts
            .iter()
            .map(|(outcome, count)| format!("{} ({})", outcome.label(), count))
            .collect();
        format!("Vote Results: {}", parts.join(", "))
    }

    /// Final message replacing the prompt once the vote is over
    ///
    /// `penalty` is the suspension length applied when `timeout` wins.
    pub fn resolution(
        target: MemberId,
        community_name: &str,
        outcome: Outcome,
        counts: &OutcomeCounts,
        penalty: Duration,
        enforced: bool,
    ) -> String {
        let verdict = match outcome {
            Outcome::Stay => format!("{} has been exonerated.", target.mention()),
            Outcome::Timeout => format!(
                "{} has been given a timeout of {} from {}.",
                target.mention(),
                Self::format_duration(penalty),
                community_name
            ),
            Outcome::Kick => format!(
                "{} has been kicked from {}.",
                target.mention(),
                community_name
            ),
            Outcome::Ban => format!(
                "{} has been banned from {}.",
                target.mention(),
                community_name
            ),
        };

        let mut message = format!("Votes are in! {} {}", verdict, Self::vote_summary(counts));
        if !enforced {
            message.push_str(&format!(
                "\n\n(The {} could not be applied automatically; a moderator needs to step in.)",
                outcome.as_str()
            ));
        }
        message
    }

    /// Public notice for a cancelled vote
    pub fn cancellation_notice(target: MemberId) -> String {
        format!(
            "The vote for {} has been successfully stopped, and their timeout has been removed.",
            target.mention()
        )
    }

    /// Private confirmation for the actor who cancelled
    pub fn cancellation_confirmed(target: MemberId) -> String {
        format!(
            "The vote for {} has been successfully stopped!",
            target.mention()
        )
    }

    /// Private confirmation for the actor who started a vote
    pub fn accusation_started() -> &'static str {
        "The vote has been successfully started!"
    }

    /// Public notice for a one-shot knockout
    pub fn knockout_notice(target: MemberId, actor: MemberId, length: Duration) -> String {
        format!(
            "{} was knocked out by {} with a brick for {}.",
            target.mention(),
            actor.mention(),
            Self::format_duration(length)
        )
    }

    /// Settings overview for `display settings`
    pub fn settings_overview(community_name: &str, settings: &CommunitySettings) -> String {
        let channel = settings
            .announcement_channel
            .map(|c| c.mention())
            .unwrap_or_else(|| "None".to_string());
        let role = settings
            .moderator_role
            .map(|r| r.mention())
            .unwrap_or_else(|| "None".to_string());
        let tally = settings
            .tally_channel
            .map(|c| c.mention())
            .unwrap_or_else(|| "None".to_string());

        format!(
            "**Current Settings for {}:**\n\n**Bot Channel**: {}\n**Mod Role**: {}\n**Vote Channel**: {}",
            community_name, channel, role, tally
        )
    }
}

//! Console output formatting for the tribunal simulation

use colored::Colorize;
use tribunal_application::{MemberDirectory, MemberProfile, PlatformActivity};
use tribunal_domain::{
    AnnouncementTemplate, ChannelId, MemberId, OutgoingMessage, RoleId, Session,
};

/// Formats platform activity and command replies for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Replace `<@id>`, `<#id>` and `<@&id>` mentions with readable names
    pub fn humanize(text: &str, directory: &dyn MemberDirectory) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find('<') {
            output.push_str(&rest[..start]);
            let candidate = &rest[start..];
            match candidate.find('>').and_then(|end| {
                Self::render_mention(&candidate[1..end], directory).map(|name| (end, name))
            }) {
                Some((end, name)) => {
                    output.push_str(&name);
                    rest = &candidate[end + 1..];
                }
                None => {
                    output.push('<');
                    rest = &candidate[1..];
                }
            }
        }

        output.push_str(rest);
        output
    }

    fn render_mention(inner: &str, directory: &dyn MemberDirectory) -> Option<String> {
        if let Some(id) = inner.strip_prefix("@&") {
            let role = RoleId::new(id.parse().ok()?);
            return Some(format!("@{}", directory.role_name(role)));
        }
        if let Some(id) = inner.strip_prefix('@') {
            let member = MemberId::new(id.parse().ok()?);
            return Some(format!("@{}", directory.member_name(member)));
        }
        if let Some(id) = inner.strip_prefix('#') {
            let channel = ChannelId::new(id.parse().ok()?);
            return Some(format!("#{}", directory.channel_name(channel)));
        }
        None
    }

    /// One platform action, as shown in the console
    pub fn format_activity(activity: &PlatformActivity, directory: &dyn MemberDirectory) -> String {
        match activity {
            PlatformActivity::MessageSent {
                channel, content, ..
            } => format!(
                "{}\n{}",
                format!("── #{} ──", channel).yellow().bold(),
                Self::format_message(content, directory)
            ),
            PlatformActivity::MessageEdited {
                channel,
                message,
                content,
            } => format!(
                "{}\n{}",
                format!("── #{} (message {} edited) ──", channel, message.message)
                    .yellow()
                    .bold(),
                Self::format_message(content, directory)
            ),
            PlatformActivity::MessageDeleted { channel, message } => {
                format!("── #{} (message {} deleted) ──", channel, message.message)
                    .dimmed()
                    .to_string()
            }
            PlatformActivity::TimedOut {
                member,
                until,
                reason,
            } => format!(
                "{} {} is suspended until {} ({})",
                "*".red().bold(),
                member.bold(),
                AnnouncementTemplate::format_end_time(*until),
                reason
            ),
            PlatformActivity::TimeoutCleared { member } => {
                format!("{} {} may speak again", "*".green().bold(), member.bold())
            }
            PlatformActivity::Kicked { member, reason } => format!(
                "{} {} was kicked ({})",
                "*".red().bold(),
                member.bold(),
                reason
            ),
            PlatformActivity::Banned { member, reason } => format!(
                "{} {} was banned ({})",
                "*".red().bold(),
                member.bold(),
                reason
            ),
        }
    }

    /// Message text followed by its controls as `[Label: id]`
    pub fn format_message(message: &OutgoingMessage, directory: &dyn MemberDirectory) -> String {
        let mut output = Self::indent(&Self::humanize(&message.content, directory), "  ");
        if message.has_controls() {
            let controls: Vec<String> = message
                .controls
                .iter()
                .map(|c| format!("[{}: {}]", c.label, c.id))
                .collect();
            output.push_str(&format!("\n  {}", controls.join(" ").cyan()));
        }
        output
    }

    /// Member roster for `/members`
    pub fn format_members(
        members: &[MemberProfile],
        acting: MemberId,
        directory: &dyn MemberDirectory,
    ) -> String {
        let now = chrono::Utc::now();
        let mut output = format!("{}\n", "Members:".cyan().bold());
        for member in members {
            let mut tags = Vec::new();
            if member.is_administrator {
                tags.push("admin".to_string());
            }
            if member.is_bot {
                tags.push("bot".to_string());
            }
            tags.extend(member.roles.iter().map(|r| directory.role_name(*r)));
            if member.is_timed_out(now) {
                tags.push("suspended".to_string());
            }

            let marker = if member.id == acting { ">" } else { " " };
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" ({})", tags.join(", ")).dimmed().to_string()
            };
            output.push_str(&format!(
                "{} {:<12} {}{}\n",
                marker, member.display_name, member.id, tags
            ));
        }
        output
    }

    /// Running votes for `/sessions`
    pub fn format_sessions(sessions: &[Session], directory: &dyn MemberDirectory) -> String {
        if sessions.is_empty() {
            return "No votes are running.".dimmed().to_string();
        }

        let mut output = format!("{}\n", "Running votes:".cyan().bold());
        for session in sessions {
            output.push_str(&format!(
                "  {} accused by {}: \"{}\"\n    ends {}\n    {}\n",
                directory.member_name(session.target()).bold(),
                directory.member_name(session.accuser),
                session.reason,
                AnnouncementTemplate::format_end_time(session.ends_at),
                AnnouncementTemplate::vote_summary(session.ledger().counts())
            ));
        }
        output
    }

    /// A private reply to the acting member
    pub fn reply(text: &str, directory: &dyn MemberDirectory) -> String {
        format!("{} {}", "(only you)".dimmed(), Self::humanize(text, directory))
    }

    /// A rejected command
    pub fn error(text: &str, directory: &dyn MemberDirectory) -> String {
        format!("{} {}", "error:".red().bold(), Self::humanize(text, directory))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Console command parsing
//!
//! Turns a line typed at the prompt into a [`ConsoleCommand`]. Names are
//! kept as typed; resolving them against the community happens later.

use thiserror::Error;
use tribunal_domain::Outcome;

/// Errors from parsing a console line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0}. Type /help for available commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

const USAGE_AS: &str = "/as <member>";
const USAGE_ACCUSE: &str = "/accuse <member> <minutes> <reason...>";
const USAGE_STOP: &str = "/stopaccuse <member>";
const USAGE_VOTE: &str = "/vote <stay|timeout|kick|ban> <member>";
const USAGE_CLICK: &str = "/click <control-id>";
const USAGE_KNOCKOUT: &str = "/knockout <member>";
const USAGE_SETTINGS: &str =
    "/settings [show | channel <#channel|none> | votechannel <#channel|none> | modrole <role|none>]";

/// A parsed `/settings` subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    Show,
    /// `None` clears the setting
    AnnouncementChannel(Option<String>),
    TallyChannel(Option<String>),
    ModeratorRole(Option<String>),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Switch the acting member
    As(String),
    Accuse {
        target: String,
        minutes: u64,
        reason: String,
    },
    StopAccuse(String),
    /// Activate the vote control for `outcome` on `target`
    Vote {
        outcome: Outcome,
        target: String,
    },
    /// Dispatch a raw control id
    Click(String),
    Knockout(String),
    Settings(SettingsCommand),
    Members,
    Sessions,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match head {
            "/as" => ConsoleCommand::As(single(&args, USAGE_AS)?),
            "/accuse" => {
                let [target, minutes_arg, ..] = args.as_slice() else {
                    return Err(ParseError::Usage(USAGE_ACCUSE));
                };
                let minutes = minutes_arg.parse().map_err(|_| {
                    ParseError::Invalid(format!(
                        "The vote duration must be a whole number of minutes, got {:?}.",
                        minutes_arg
                    ))
                })?;
                // Everything after the duration is the reason, spacing preserved
                let reason = rest[target.len()..].trim_start()[minutes_arg.len()..]
                    .trim()
                    .to_string();
                ConsoleCommand::Accuse {
                    target: target.to_string(),
                    minutes,
                    reason,
                }
            }
            "/stopaccuse" => ConsoleCommand::StopAccuse(single(&args, USAGE_STOP)?),
            "/vote" => {
                let [outcome, target] = args.as_slice() else {
                    return Err(ParseError::Usage(USAGE_VOTE));
                };
                let outcome = outcome
                    .parse()
                    .map_err(|e: tribunal_domain::DomainError| ParseError::Invalid(e.to_string()))?;
                ConsoleCommand::Vote {
                    outcome,
                    target: target.to_string(),
                }
            }
            "/click" => ConsoleCommand::Click(single(&args, USAGE_CLICK)?),
            "/knockout" | "/ko" => ConsoleCommand::Knockout(single(&args, USAGE_KNOCKOUT)?),
            "/settings" => ConsoleCommand::Settings(parse_settings(&args)?),
            "/members" => ConsoleCommand::Members,
            "/sessions" => ConsoleCommand::Sessions,
            "/help" | "/h" | "/?" => ConsoleCommand::Help,
            "/quit" | "/exit" | "/q" => ConsoleCommand::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn single(args: &[&str], usage: &'static str) -> Result<String, ParseError> {
    match args {
        [value] => Ok(value.to_string()),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn parse_settings(args: &[&str]) -> Result<SettingsCommand, ParseError> {
    let optional = |value: &str| {
        if value.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(value.to_string())
        }
    };

    match args {
        [] | ["show"] => Ok(SettingsCommand::Show),
        ["channel", value] => Ok(SettingsCommand::AnnouncementChannel(optional(value))),
        ["votechannel", value] => Ok(SettingsCommand::TallyChannel(optional(value))),
        ["modrole", value] => Ok(SettingsCommand::ModeratorRole(optional(value))),
        _ => Err(ParseError::Usage(USAGE_SETTINGS)),
    }
}

/// Help text listing every command
pub fn help_text() -> String {
    [
        ("/as <member>", "Act as another member"),
        (USAGE_ACCUSE, "Start a vote and suspend the member while it runs"),
        (USAGE_STOP, "Stop a running vote and lift the suspension"),
        (USAGE_VOTE, "Cast or change your vote"),
        (USAGE_CLICK, "Activate a control by id (e.g. kick_103)"),
        (USAGE_KNOCKOUT, "Suspend a member for a day, no vote"),
        ("/settings ...", "Show or change community settings (admins)"),
        ("/members", "List community members"),
        ("/sessions", "List running votes"),
        ("/help", "Show this help"),
        ("/quit", "Exit"),
    ]
    .iter()
    .map(|(usage, description)| format!("  {:<44} {}", usage, description))
    .collect::<Vec<_>>()
    .join("\n")
}

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tribunal_application::{PLATFORM_MAX_TIMEOUT_MINUTES, TribunalConfig};
use tribunal_domain::{ChannelId, CommunityId, MemberId, RoleId};

/// Longest suspension the platform accepts, in whole hours
const MAX_SUSPENSION_HOURS: u64 = PLATFORM_MAX_TIMEOUT_MINUTES / 60;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("vote.max_duration_minutes must be between 1 and {PLATFORM_MAX_TIMEOUT_MINUTES}")]
    InvalidMaxDuration,

    #[error("vote.penalty_timeout_hours must be between 1 and {MAX_SUSPENSION_HOURS}")]
    InvalidPenaltyTimeout,

    #[error("vote.knockout_hours must be between 1 and {MAX_SUSPENSION_HOURS}")]
    InvalidKnockoutTimeout,

    #[error("member name cannot be empty")]
    EmptyMemberName,

    #[error("duplicate member name in simulation roster: {0}")]
    DuplicateMemberName(String),

    #[error("member {member} references unknown role {role}")]
    UnknownRole { member: String, role: String },
}

/// Where per-community settings are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub settings_path: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("data/settings.json"),
        }
    }
}

/// Structured moderation audit log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    pub enabled: bool,
    /// JSONL destination; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

/// Diagnostic log output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write diagnostic logs to this file
    pub file: Option<PathBuf>,
}

/// Console front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
            history_file: None,
        }
    }
}

/// Vote parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVoteConfig {
    /// Longest vote an accuser may request
    pub max_duration_minutes: u64,
    /// Length of the suspension when `timeout` wins
    pub penalty_timeout_hours: u64,
    /// Length of a knockout
    pub knockout_hours: u64,
}

impl Default for FileVoteConfig {
    fn default() -> Self {
        Self {
            max_duration_minutes: PLATFORM_MAX_TIMEOUT_MINUTES,
            penalty_timeout_hours: 24,
            knockout_hours: 24,
        }
    }
}

/// A channel in the simulated community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChannel {
    pub id: ChannelId,
    pub name: String,
}

/// A role in the simulated community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRole {
    pub id: RoleId,
    pub name: String,
}

/// A member of the simulated community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMember {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub administrator: bool,
    /// Role names
    #[serde(default)]
    pub roles: Vec<String>,
}

impl FileMember {
    fn new(id: u64, name: &str) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.to_string(),
            bot: false,
            administrator: false,
            roles: Vec::new(),
        }
    }
}

/// The community simulated by the console front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    pub community_id: CommunityId,
    pub community_name: String,
    pub bot_id: MemberId,
    pub bot_name: String,
    /// Channel the console commands are issued from
    pub default_channel: String,
    pub channels: Vec<FileChannel>,
    pub roles: Vec<FileRole>,
    pub members: Vec<FileMember>,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        let admin = FileMember {
            administrator: true,
            ..FileMember::new(101, "ada")
        };
        let moderator = FileMember {
            roles: vec!["moderators".to_string()],
            ..FileMember::new(102, "marcus")
        };
        let dj = FileMember {
            bot: true,
            ..FileMember::new(150, "dj-bot")
        };

        Self {
            community_id: CommunityId::new(1),
            community_name: "The Commons".to_string(),
            bot_id: MemberId::new(100),
            bot_name: "tribunal".to_string(),
            default_channel: "general".to_string(),
            channels: vec![
                FileChannel {
                    id: ChannelId::new(10),
                    name: "general".to_string(),
                },
                FileChannel {
                    id: ChannelId::new(11),
                    name: "tribunal".to_string(),
                },
                FileChannel {
                    id: ChannelId::new(12),
                    name: "vote-log".to_string(),
                },
            ],
            roles: vec![FileRole {
                id: RoleId::new(20),
                name: "moderators".to_string(),
            }],
            members: vec![
                admin,
                moderator,
                FileMember::new(103, "bea"),
                FileMember::new(104, "cole"),
                FileMember::new(105, "dara"),
                FileMember::new(106, "eli"),
                dj,
            ],
        }
    }
}

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub storage: FileStorageConfig,
    pub audit: FileAuditConfig,
    pub logging: FileLoggingConfig,
    pub console: FileConsoleConfig,
    pub vote: FileVoteConfig,
    pub simulation: FileSimulationConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let max = self.vote.max_duration_minutes;
        if max == 0 || max > PLATFORM_MAX_TIMEOUT_MINUTES {
            return Err(ConfigValidationError::InvalidMaxDuration);
        }
        if !(1..=MAX_SUSPENSION_HOURS).contains(&self.vote.penalty_timeout_hours) {
            return Err(ConfigValidationError::InvalidPenaltyTimeout);
        }
        if !(1..=MAX_SUSPENSION_HOURS).contains(&self.vote.knockout_hours) {
            return Err(ConfigValidationError::InvalidKnockoutTimeout);
        }

        let mut seen = std::collections::HashSet::new();
        for member in &self.simulation.members {
            let name = member.name.trim();
            if name.is_empty() {
                return Err(ConfigValidationError::EmptyMemberName);
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ConfigValidationError::DuplicateMemberName(name.to_string()));
            }
            for role in &member.roles {
                if !self.simulation.roles.iter().any(|r| &r.name == role) {
                    return Err(ConfigValidationError::UnknownRole {
                        member: name.to_string(),
                        role: role.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Vote parameters for the application layer
    pub fn tribunal_config(&self) -> TribunalConfig {
        TribunalConfig::default()
            .with_max_duration_minutes(self.vote.max_duration_minutes)
            .with_penalty_timeout(hours(self.vote.penalty_timeout_hours))
            .with_knockout_timeout(hours(self.vote.knockout_hours))
    }

    /// Audit log destination when auditing is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.audit.enabled {
            return None;
        }
        self.audit.path.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join("community-tribunal").join("audit.jsonl"))
        })
    }
}

fn hours(h: u64) -> Duration {
    Duration::from_secs(h.saturating_mul(60 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[storage]
settings_path = "/var/lib/tribunal/settings.json"

[audit]
enabled = true
path = "/var/log/tribunal/audit.jsonl"

[logging]
file = "/var/log/tribunal/tribunal.log"

[console]
color = false

[vote]
max_duration_minutes = 1440
penalty_timeout_hours = 12

[simulation]
community_id = 77
community_name = "Book Club"
bot_id = 5

[[simulation.channels]]
id = 1
name = "lobby"

[[simulation.roles]]
id = 2
name = "mods"

[[simulation.members]]
id = 10
name = "ana"
administrator = true

[[simulation.members]]
id = 11
name = "ben"
roles = ["mods"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.storage.settings_path,
            PathBuf::from("/var/lib/tribunal/settings.json")
        );
        assert!(config.audit.enabled);
        assert!(!config.console.color);
        assert_eq!(config.vote.max_duration_minutes, 1440);
        assert_eq!(config.vote.knockout_hours, 24);
        assert_eq!(config.simulation.community_id, CommunityId::new(77));
        assert_eq!(config.simulation.members.len(), 2);
        assert!(config.simulation.members[0].administrator);
        assert_eq!(config.simulation.members[1].roles, vec!["mods"]);
        assert!(config.validate().is_ok());

        let tribunal = config.tribunal_config();
        assert_eq!(tribunal.max_duration_minutes, 1440);
        assert_eq!(tribunal.penalty_timeout, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[vote]
penalty_timeout_hours = 6
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.vote.penalty_timeout_hours, 6);
        // Defaults should apply
        assert_eq!(config.vote.max_duration_minutes, PLATFORM_MAX_TIMEOUT_MINUTES);
        assert!(!config.audit.enabled);
        assert_eq!(config.simulation.community_name, "The Commons");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.audit_path().is_none());
    }

    #[test]
    fn test_validate_zero_duration() {
        let config: FileConfig = toml::from_str("[vote]\nmax_duration_minutes = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxDuration)
        ));
    }

    #[test]
    fn test_validate_zero_penalty() {
        let config: FileConfig = toml::from_str("[vote]\npenalty_timeout_hours = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPenaltyTimeout)
        ));
    }

    #[test]
    fn test_validate_penalty_over_platform_limit() {
        let config: FileConfig = toml::from_str("[vote]\npenalty_timeout_hours = 673\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPenaltyTimeout)
        ));

        let config: FileConfig = toml::from_str("[vote]\npenalty_timeout_hours = 672\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_knockout_bounds() {
        let config: FileConfig = toml::from_str("[vote]\nknockout_hours = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidKnockoutTimeout)
        ));

        let config: FileConfig = toml::from_str("[vote]\nknockout_hours = 1000\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidKnockoutTimeout)
        ));
    }

    #[test]
    fn test_huge_hours_do_not_overflow() {
        let config: FileConfig =
            toml::from_str("[vote]\npenalty_timeout_hours = 9223372036854775807\n").unwrap();
        assert!(config.validate().is_err());
        // Unvalidated values still convert, capped at the platform limit
        assert_eq!(
            config.tribunal_config().penalty_timeout,
            tribunal_application::PLATFORM_MAX_TIMEOUT
        );
    }

    #[test]
    fn test_validate_empty_member_name() {
        let mut config = FileConfig::default();
        config.simulation.members[0].name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyMemberName)
        ));
    }

    #[test]
    fn test_validate_unknown_role() {
        let mut config = FileConfig::default();
        config.simulation.members[2].roles.push("wardens".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownRole { .. })
        ));
    }
}

//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for community-tribunal
#[derive(Parser, Debug)]
#[command(name = "tribunal")]
#[command(author, version, about = "Community Tribunal - Let the community vote on accused members")]
#[command(long_about = r#"
Community Tribunal lets moderators put a member on trial. The accused is
suspended while the community votes on one of four outcomes:

  stay      nothing happens
  timeout   a 24 hour suspension
  kick      removal from the community
  ban       permanent removal

When the vote ends the outcome with the most votes is enforced. Ties go to
the less severe outcome.

This binary runs a console simulation of one community. Act as any member
with /as, then /accuse, /vote and /stopaccuse as that member.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./tribunal.toml       Project-level config
3. ~/.config/community-tribunal/config.toml   Global config

Example:
  tribunal
  tribunal --as marcus -vv
  tribunal --config ./my-community.toml
"#)]
pub struct Cli {
    /// Member to act as when the console starts
    #[arg(long = "as", value_name = "MEMBER")]
    pub acting_as: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["tribunal", "--as", "marcus", "-vv", "--no-config"]);
        assert_eq!(cli.acting_as.as_deref(), Some("marcus"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        assert!(cli.config.is_none());
    }
}

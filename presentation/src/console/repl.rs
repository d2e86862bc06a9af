//! REPL (Read-Eval-Print Loop) for the community console

use super::command::{ConsoleCommand, SettingsCommand, help_text};
use crate::ConsoleFormatter;
use crate::config::ConsoleConfig;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tribunal_application::{
    AccusationUseCase, CancelAccusationInput, CommunitySettingsUseCase, KnockoutInput,
    KnockoutUseCase, MemberDirectory, MemberProfile, ModerationPlatform, SettingsRepository,
    StartAccusationInput, change_confirmation,
};
use tribunal_domain::{AnnouncementTemplate, ControlId, MemberId, SettingChange};

/// Interactive console acting as members of one community
pub struct TribunalConsole<P, S>
where
    P: ModerationPlatform + MemberDirectory + 'static,
    S: SettingsRepository + 'static,
{
    platform: Arc<P>,
    accusations: Arc<AccusationUseCase<P, S>>,
    settings: CommunitySettingsUseCase<P, S>,
    knockout: KnockoutUseCase<P, S>,
    acting: MemberId,
    config: ConsoleConfig,
}

impl<P, S> TribunalConsole<P, S>
where
    P: ModerationPlatform + MemberDirectory + 'static,
    S: SettingsRepository + 'static,
{
    pub fn new(
        platform: Arc<P>,
        accusations: Arc<AccusationUseCase<P, S>>,
        settings: CommunitySettingsUseCase<P, S>,
        knockout: KnockoutUseCase<P, S>,
        acting: MemberId,
    ) -> Self {
        Self {
            platform,
            accusations,
            settings,
            knockout,
            acting,
            config: ConsoleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .config
            .history_file
            .as_ref()
            .map(std::path::PathBuf::from)
            .or_else(|| dirs::data_dir().map(|p| p.join("community-tribunal").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = format!("{}> ", self.platform.member_name(self.acting));
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ConsoleCommand::parse(line) {
                        Ok(Some(ConsoleCommand::Quit)) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(Some(command)) => self.execute(command).await,
                        Ok(None) => {}
                        Err(e) => println!("{}", self.error(&e.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let community = self.platform.community();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Community Tribunal - Console Mode     │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Community {} in #{}, acting as {}",
            community,
            self.platform.channel_name(self.platform.default_channel()),
            self.platform.member_name(self.acting).bold()
        );
        println!();
        println!("Commands:");
        println!("{}", help_text());
        println!();
    }

    /// Run one command as the acting member and print the outcome
    pub async fn execute(&mut self, command: ConsoleCommand) {
        let output = match command {
            ConsoleCommand::As(name) => match self.member(&name) {
                Ok(member) => {
                    self.acting = member.id;
                    format!("Now acting as {}", member.display_name.bold())
                }
                Err(e) => e,
            },
            ConsoleCommand::Accuse {
                target,
                minutes,
                reason,
            } => self.accuse(&target, minutes, reason).await,
            ConsoleCommand::StopAccuse(target) => self.stop_accuse(&target).await,
            ConsoleCommand::Vote { outcome, target } => match self.member(&target) {
                Ok(member) => self.click(&ControlId::new(outcome, member.id).encode()).await,
                Err(e) => e,
            },
            ConsoleCommand::Click(control_id) => self.click(&control_id).await,
            ConsoleCommand::Knockout(target) => self.knock_out(&target).await,
            ConsoleCommand::Settings(command) => self.settings(command).await,
            ConsoleCommand::Members => ConsoleFormatter::format_members(
                &self.platform.members(),
                self.acting,
                self.platform.as_ref(),
            ),
            ConsoleCommand::Sessions => ConsoleFormatter::format_sessions(
                &self.accusations.active_sessions(self.platform.community()),
                self.platform.as_ref(),
            ),
            ConsoleCommand::Help => format!("Commands:\n{}", help_text()),
            ConsoleCommand::Quit => return,
        };
        println!("{}", output);
    }

    async fn accuse(&self, target: &str, minutes: u64, reason: String) -> String {
        let target = match self.member(target) {
            Ok(member) => member,
            Err(e) => return e,
        };
        let input = StartAccusationInput {
            community: self.platform.community(),
            origin_channel: self.platform.default_channel(),
            accuser: self.acting,
            target: target.id,
            reason,
            duration_minutes: minutes,
        };

        match self.accusations.start_accusation(input).await {
            Ok(_) => self.reply(AnnouncementTemplate::accusation_started()),
            Err(e) => self.error(&e.to_string()),
        }
    }

    async fn stop_accuse(&self, target: &str) -> String {
        let target = match self.member(target) {
            Ok(member) => member,
            Err(e) => return e,
        };
        let input = CancelAccusationInput {
            community: self.platform.community(),
            origin_channel: self.platform.default_channel(),
            actor: self.acting,
            target: target.id,
        };

        match self.accusations.cancel_accusation(input).await {
            Ok(_) => self.reply(&AnnouncementTemplate::cancellation_confirmed(target.id)),
            Err(e) => self.error(&e.to_string()),
        }
    }

    async fn click(&self, control_id: &str) -> String {
        match self.accusations.cast_vote(self.platform.community(), control_id, self.acting) {
            Ok(receipt) => self.reply(&AnnouncementTemplate::vote_recorded(receipt.outcome)),
            Err(e) => self.error(&e.to_string()),
        }
    }

    async fn knock_out(&self, target: &str) -> String {
        let target = match self.member(target) {
            Ok(member) => member,
            Err(e) => return e,
        };
        let input = KnockoutInput {
            community: self.platform.community(),
            origin_channel: self.platform.default_channel(),
            actor: self.acting,
            target: target.id,
        };

        match self.knockout.knock_out(input).await {
            Ok(_) => self.reply("The knockout was successful!"),
            Err(e) => self.error(&e.to_string()),
        }
    }

    async fn settings(&self, command: SettingsCommand) -> String {
        let community = self.platform.community();
        let change = match command {
            SettingsCommand::Show => {
                return match self.settings.overview(community).await {
                    Ok(overview) => self.reply(&overview.render()),
                    Err(e) => self.error(&e.to_string()),
                };
            }
            SettingsCommand::AnnouncementChannel(name) => {
                match self.optional(name, |n| self.platform.find_channel(n), "channel") {
                    Ok(channel) => SettingChange::AnnouncementChannel(channel),
                    Err(e) => return e,
                }
            }
            SettingsCommand::TallyChannel(name) => {
                match self.optional(name, |n| self.platform.find_channel(n), "channel") {
                    Ok(channel) => SettingChange::TallyChannel(channel),
                    Err(e) => return e,
                }
            }
            SettingsCommand::ModeratorRole(name) => {
                match self.optional(name, |n| self.platform.find_role(n), "role") {
                    Ok(role) => SettingChange::ModeratorRole(role),
                    Err(e) => return e,
                }
            }
        };

        match self.settings.change(community, self.acting, change).await {
            Ok(_) => self.reply(&change_confirmation(&change)),
            Err(e) => self.error(&e.to_string()),
        }
    }

    /// Resolve an optional name; `None` means "clear"
    fn optional<T>(
        &self,
        name: Option<String>,
        find: impl Fn(&str) -> Option<T>,
        kind: &str,
    ) -> Result<Option<T>, String> {
        match name {
            None => Ok(None),
            Some(name) => find(&name)
                .map(Some)
                .ok_or_else(|| self.error(&format!("No {} named {}.", kind, name))),
        }
    }

    fn member(&self, name: &str) -> Result<MemberProfile, String> {
        self.platform
            .find_member(name)
            .ok_or_else(|| self.error(&format!("No member named {}.", name)))
    }

    fn reply(&self, text: &str) -> String {
        ConsoleFormatter::reply(text, self.platform.as_ref())
    }

    fn error(&self, text: &str) -> String {
        ConsoleFormatter::error(text, self.platform.as_ref())
    }
}

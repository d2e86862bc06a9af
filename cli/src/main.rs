//! CLI entrypoint for Community Tribunal
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tribunal_application::{
    AccusationUseCase, AuditLogger, CommunitySettingsUseCase, KnockoutUseCase, MemberDirectory,
    NoAuditLogger, SessionStore,
};
use tribunal_infrastructure::{
    ConfigLoader, FileConfig, JsonSettingsRepository, JsonlAuditLogger, SimulatedPlatform,
};
use tribunal_presentation::{Cli, ConsoleActivityPrinter, ConsoleConfig, TribunalConsole};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    let _log_guard = init_logging(cli.verbose, &config);

    if cli.no_color || !config.console.color {
        colored::control::set_override(false);
    }

    info!("Starting Community Tribunal");

    // === Dependency Injection ===
    let printer = Arc::new(ConsoleActivityPrinter::new());
    let platform = Arc::new(
        SimulatedPlatform::from_config(&config.simulation).with_observer(printer.clone()),
    );
    let directory: Arc<dyn MemberDirectory> = platform.clone();
    printer.attach(Arc::downgrade(&directory));

    let settings = Arc::new(JsonSettingsRepository::new(&config.storage.settings_path));
    let audit: Arc<dyn AuditLogger> = match config.audit_path() {
        Some(path) => match JsonlAuditLogger::new(&path) {
            Some(logger) => Arc::new(logger),
            None => {
                warn!("Audit log {} could not be opened", path.display());
                Arc::new(NoAuditLogger)
            }
        },
        None => Arc::new(NoAuditLogger),
    };

    let tribunal_config = config.tribunal_config();
    let accusations = Arc::new(
        AccusationUseCase::new(platform.clone(), settings.clone(), Arc::new(SessionStore::new()))
            .with_audit_logger(audit.clone())
            .with_config(tribunal_config.clone()),
    );
    let community_settings = CommunitySettingsUseCase::new(platform.clone(), settings.clone())
        .with_audit_logger(audit.clone());
    let knockout = KnockoutUseCase::new(platform.clone(), settings)
        .with_audit_logger(audit)
        .with_config(tribunal_config);

    let acting = match &cli.acting_as {
        Some(name) => match platform.find_member(name) {
            Some(member) => member.id,
            None => bail!("No member named {} in {}", name, platform.name()),
        },
        None => match platform.members().into_iter().find(|m| m.is_administrator) {
            Some(member) => member.id,
            None => bail!("{} has no administrator to act as; use --as", platform.name()),
        },
    };

    let console_config = ConsoleConfig {
        color: config.console.color && !cli.no_color,
        history_file: config.console.history_file.clone(),
    };

    let mut console = TribunalConsole::new(
        platform,
        accusations,
        community_settings,
        knockout,
        acting,
    )
    .with_config(console_config);

    console.run().await?;
    Ok(())
}

/// Initialize logging based on verbosity level, with an optional log file
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &config.logging.file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().map(|n| n.to_owned());
            match name {
                Some(name) => {
                    let appender = tracing_appender::rolling::never(
                        dir.unwrap_or_else(|| std::path::Path::new(".")),
                        name,
                    );
                    let (writer, guard) = tracing_appender::non_blocking(appender);
                    let layer = fmt::layer().with_writer(writer).with_ansi(false);
                    (Some(layer), Some(guard))
                }
                None => (None, None),
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

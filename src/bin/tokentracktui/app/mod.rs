mod commands;
mod dashboard;

use clap::Parser;

use tokentracktui::config::{AppConfig, ConfigStore};

use crate::args::{CliArgs, Command};
use crate::logging::{init_logging, LoggingSettings};

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut store = ConfigStore::open(args.config_dir.clone())?;

    // The log file location has to be known before the logger starts, so it
    // is read ahead; the real load below runs with logging in place.
    let log_file = store.peek().and_then(|config| config.app.log_file);
    let settings = LoggingSettings::new(&AppConfig::default(), store.paths())
        .with_log_file(log_file)
        .with_level(args.level_override())
        .with_console(args.debug);
    let mut logging = init_logging(&settings)?;
    log::info!(
        "Starting TokenTrackTUI {} - {}",
        tokentracktui::VERSION,
        tokentracktui::CODENAME
    );

    // A load failure is reported again by whichever command needs the config.
    if let Ok(config) = store.get() {
        if args.level_override().is_none() {
            logging.set_level(config.app.log_level)?;
        }
    }
    log::debug!("Active log level: {}", logging.level());

    match &args.command {
        Some(Command::Config(config_args)) => commands::handle_config(&mut store, config_args),
        Some(Command::Providers(provider_args)) => {
            commands::handle_providers(&mut store, provider_args)
        }
        None => dashboard::run_dashboard(&mut store, &args).await,
    }
}

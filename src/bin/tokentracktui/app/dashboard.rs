use std::time::{Duration, Instant};

use tokentracktui::config::{Config, ConfigSource, ConfigStore};
use tokentracktui::dashboard::DashboardSnapshot;

use crate::args::CliArgs;
use crate::logging::log_timing;

const LOADING_DELAY: Duration = Duration::from_millis(200);

pub(super) async fn run_dashboard(store: &mut ConfigStore, args: &CliArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    println!(
        "TokenTrackTUI v{} - {}",
        tokentracktui::VERSION,
        tokentracktui::CODENAME
    );
    println!("Initializing Neural Nexus interface...");

    let mut config = load_or_default(store);
    if args.dry_run {
        config.app.dry_run_mode = true;
        println!("Dry-run mode enabled - no actual API calls will be made");
    }
    log::info!(
        "Loaded configuration with {} providers",
        config.providers.len()
    );

    tokio::select! {
        _ = tokio::time::sleep(LOADING_DELAY) => {}
        _ = tokio::signal::ctrl_c() => {
            println!("\nApplication interrupted by user");
            return Ok(());
        }
    }

    let snapshot = DashboardSnapshot::from_config(&config);
    println!("\n{}", snapshot.render_plain());
    log_timing(
        "dashboard_load",
        started.elapsed(),
        config.enabled_providers().count(),
    );
    Ok(())
}

/// Falls back to an in-memory default so the dashboard still comes up.
fn load_or_default(store: &mut ConfigStore) -> Config {
    match store.get() {
        Ok(config) => {
            let config = config.clone();
            if let Some(ConfigSource::Recovered(err)) = store.source() {
                eprintln!(
                    "Warning: {} does not match the expected schema ({err}); using defaults",
                    store.config_file().display()
                );
            }
            config
        }
        Err(err) => {
            log::error!("Configuration error: {err}");
            eprintln!("Warning: {err}. Using default configuration");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tokentracktui::config::ConfigPaths;

    use super::*;

    fn store_with(contents: &str) -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(ConfigPaths::in_dir(dir.path()));
        fs::write(store.config_file(), contents).unwrap();
        (dir, store)
    }

    #[test]
    fn broken_syntax_falls_back_to_empty_default() {
        let (_dir, mut store) = store_with("[[[");
        assert_eq!(load_or_default(&mut store), Config::default());
        assert!(!store.is_loaded());
    }

    #[test]
    fn schema_mismatch_uses_recovered_bootstrap() {
        let (_dir, mut store) = store_with("[app]\nlog_level = \"loud\"\n");
        assert_eq!(load_or_default(&mut store), Config::bootstrap());
        assert!(matches!(store.source(), Some(ConfigSource::Recovered(_))));
    }
}

use std::io::{self, BufRead, Write};

use tokentracktui::config::{ConfigSource, ConfigStore, ProviderConfig};
use tokentracktui::dashboard::DashboardSnapshot;

use crate::args::{ConfigArgs, ProvidersArgs};

pub fn handle_config(store: &mut ConfigStore, args: &ConfigArgs) -> anyhow::Result<()> {
    if args.show || !args.reset {
        return show_config(store);
    }
    if args.yes || confirm("Are you sure you want to reset configuration to defaults?")? {
        store.reset()?;
        println!("Configuration reset: {}", store.config_file().display());
    }
    Ok(())
}

fn show_config(store: &mut ConfigStore) -> anyhow::Result<()> {
    let path = store.config_file().display().to_string();
    let config = store.get()?.clone();
    println!("Configuration file: {path}");
    println!("Version: {}", config.version);
    println!("Providers: {}", config.providers.len());
    println!("Log level: {}", config.app.log_level);
    println!("Theme: {}", config.ui.theme);
    if let Some(ConfigSource::Recovered(err)) = store.source() {
        println!("Note: file does not match the schema ({err}); showing defaults");
    }
    Ok(())
}

pub fn handle_providers(store: &mut ConfigStore, args: &ProvidersArgs) -> anyhow::Result<()> {
    if args.list {
        return list_providers(store);
    }
    if let Some(name) = args.add.as_deref() {
        let kind = args.kind.as_deref().unwrap_or("mock");
        let provider = args.settings.iter().fold(
            ProviderConfig::new(name, kind).with_enabled(!args.disabled),
            |provider, (key, value)| provider.with_setting(key.as_str(), setting_value(value)),
        );
        store.add_provider(provider)?;
        store.save()?;
        println!("Added provider: {name} ({kind})");
        return Ok(());
    }
    if let Some(name) = args.remove.as_deref() {
        if store.remove_provider(name)? {
            store.save()?;
            println!("Removed provider: {name}");
        } else {
            println!("No provider named '{name}'");
        }
        return Ok(());
    }
    list_providers(store)
}

fn list_providers(store: &mut ConfigStore) -> anyhow::Result<()> {
    let snapshot = DashboardSnapshot::from_config(store.get()?);
    for line in &snapshot.provider_lines {
        println!("{line}");
    }
    Ok(())
}

/// Reads a `--setting` value as a TOML literal, falling back to a plain string.
fn setting_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

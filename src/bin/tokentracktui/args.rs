use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tokentracktui::config::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "tokentracktui",
    version,
    about = "Neural Nexus - Advanced TUI for LLM Token Usage Monitoring"
)]
pub struct CliArgs {
    /// Custom configuration directory path
    #[arg(long, short = 'c', global = true)]
    pub config_dir: Option<PathBuf>,
    /// DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, short = 'l', global = true)]
    pub log_level: Option<LogLevel>,
    /// Run without making provider API calls
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,
    /// Verbose logging, mirrored to stderr
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or reset the configuration
    Config(ConfigArgs),
    /// List, add or remove providers
    Providers(ProvidersArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, short = 's')]
    pub show: bool,
    /// Reset configuration to defaults
    #[arg(long, short = 'r', conflicts_with = "show")]
    pub reset: bool,
    /// Skip the reset confirmation
    #[arg(long, short = 'y', requires = "reset")]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// List configured providers (the default)
    #[arg(long, conflicts_with_all = ["add", "remove"])]
    pub list: bool,
    #[arg(long, short = 'a', value_name = "NAME", requires = "kind")]
    pub add: Option<String>,
    /// Provider type for --add (mock, gcp, openai, anthropic, azure, ...)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: Option<String>,
    /// Add the provider disabled
    #[arg(long, requires = "add")]
    pub disabled: bool,
    #[arg(long = "setting", value_name = "KEY=VALUE", value_parser = parse_key_value, requires = "add")]
    pub settings: Vec<(String, String)>,
    #[arg(long, short = 'r', value_name = "NAME", conflicts_with = "add")]
    pub remove: Option<String>,
}

impl CliArgs {
    /// Level requested on the command line; `--debug` wins over `--log-level`.
    pub fn level_override(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

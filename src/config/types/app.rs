use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toml::Table;

use super::super::error::SchemaError;
use super::super::schema::{Fields, FromTable};
use super::{Extra, DEFAULT_CACHE_TTL, DEFAULT_DATA_RETENTION_DAYS};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Eq, PartialEq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// `log` has no level above error, so CRITICAL shares it.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Debug => log::LevelFilter::Debug,
            Self::Info => log::LevelFilter::Info,
            Self::Warning => log::LevelFilter::Warn,
            Self::Error | Self::Critical => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|level| level.as_str()).collect();
                format!(
                    "invalid log level '{raw}', valid levels: {}",
                    valid.join(", ")
                )
            })
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, String> {
        raw.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Application-level settings stored under `[app]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub log_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    /// Seconds
    pub cache_ttl: u64,
    pub data_retention_days: u32,
    pub dry_run_mode: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_file: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            data_retention_days: DEFAULT_DATA_RETENTION_DAYS,
            dry_run_mode: false,
            extra: Extra::new(),
        }
    }
}

impl FromTable for AppConfig {
    fn from_table_at(table: Table, at: &str) -> Result<Self, SchemaError> {
        let defaults = Self::default();
        let mut fields = Fields::new(table, at);
        Ok(Self {
            log_level: fields.or("log_level", defaults.log_level)?,
            log_file: fields.optional("log_file")?,
            cache_ttl: fields.or("cache_ttl", defaults.cache_ttl)?,
            data_retention_days: fields.or("data_retention_days", defaults.data_retention_days)?,
            dry_run_mode: fields.or("dry_run_mode", defaults.dry_run_mode)?,
            extra: fields.into_extra(),
        })
    }
}

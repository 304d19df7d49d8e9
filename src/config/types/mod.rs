mod app;
mod provider;
mod root;
mod ui;

use std::collections::BTreeMap;

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_THEME: &str = "neural-nexus";
const DEFAULT_TERMINAL_WIDTH_MIN: u32 = 80;
const DEFAULT_TERMINAL_WIDTH_OPTIMAL: u32 = 120;
const DEFAULT_REFRESH_INTERVAL: u64 = 30;
const DEFAULT_CACHE_TTL: u64 = 3_600;
const DEFAULT_DATA_RETENTION_DAYS: u32 = 90;
const DEFAULT_MOCK_DATA_POINTS: i64 = 100;

/// Unrecognized keys of a record, kept verbatim so they survive a save.
pub type Extra = BTreeMap<String, toml::Value>;

pub use app::{AppConfig, LogLevel};
pub use provider::{Credentials, ProviderConfig, ProviderKind};
pub use root::Config;
pub use ui::{ColorMode, UiConfig};

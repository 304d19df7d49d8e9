use serde::Serialize;
use toml::Table;

use super::super::error::SchemaError;
use super::super::schema::{Fields, FromTable};
use super::{AppConfig, Extra, ProviderConfig, UiConfig, DEFAULT_MOCK_DATA_POINTS, DEFAULT_VERSION};

/// Root of the configuration file.
///
/// Top-level keys this crate does not know are kept in `extra` and written
/// back on save, so files from newer releases survive a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub version: String,
    pub app: AppConfig,
    pub ui: UiConfig,
    /// Display order follows insertion order
    pub providers: Vec<ProviderConfig>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            app: AppConfig::default(),
            ui: UiConfig::default(),
            providers: Vec::new(),
            extra: Extra::new(),
        }
    }
}

impl Config {
    /// Configuration written on first launch: defaults plus one mock provider.
    pub fn bootstrap() -> Self {
        let mock = ProviderConfig::new("Mock Provider", "mock")
            .with_setting("generate_realistic_data", true)
            .with_setting("data_points", DEFAULT_MOCK_DATA_POINTS);
        Self {
            providers: vec![mock],
            ..Self::default()
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|provider| provider.enabled)
    }
}

impl FromTable for Config {
    fn from_table_at(table: Table, at: &str) -> Result<Self, SchemaError> {
        let mut fields = Fields::new(table, at);
        Ok(Self {
            version: fields.or("version", DEFAULT_VERSION.to_string())?,
            app: fields.section("app")?,
            ui: fields.section("ui")?,
            providers: fields.records("providers")?,
            extra: fields.into_extra(),
        })
    }
}

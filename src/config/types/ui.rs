use serde::{Deserialize, Serialize};
use toml::Table;

use super::super::error::SchemaError;
use super::super::schema::{Fields, FromTable};
use super::{
    Extra, DEFAULT_REFRESH_INTERVAL, DEFAULT_TERMINAL_WIDTH_MIN, DEFAULT_TERMINAL_WIDTH_OPTIMAL,
    DEFAULT_THEME,
};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Dark,
    Light,
    Mono,
}

/// UI configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiConfig {
    /// Active theme name
    pub theme: String,
    pub terminal_width_min: u32,
    pub terminal_width_optimal: u32,
    /// Auto-refresh interval in seconds
    pub refresh_interval: u64,
    pub animations_enabled: bool,
    /// Box-drawing and status glyphs; ASCII fallbacks when off
    pub unicode_enabled: bool,
    pub color_mode: ColorMode,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            terminal_width_min: DEFAULT_TERMINAL_WIDTH_MIN,
            terminal_width_optimal: DEFAULT_TERMINAL_WIDTH_OPTIMAL,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            animations_enabled: true,
            unicode_enabled: true,
            color_mode: ColorMode::Auto,
            extra: Extra::new(),
        }
    }
}

impl FromTable for UiConfig {
    fn from_table_at(table: Table, at: &str) -> Result<Self, SchemaError> {
        let defaults = Self::default();
        let mut fields = Fields::new(table, at);
        Ok(Self {
            theme: fields.or("theme", defaults.theme)?,
            terminal_width_min: fields.or("terminal_width_min", defaults.terminal_width_min)?,
            terminal_width_optimal: fields
                .or("terminal_width_optimal", defaults.terminal_width_optimal)?,
            refresh_interval: fields.or("refresh_interval", defaults.refresh_interval)?,
            animations_enabled: fields.or("animations_enabled", defaults.animations_enabled)?,
            unicode_enabled: fields.or("unicode_enabled", defaults.unicode_enabled)?,
            color_mode: fields.or("color_mode", defaults.color_mode)?,
            extra: fields.into_extra(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<UiConfig, SchemaError> {
        UiConfig::from_table_at(toml::from_str(text).unwrap(), "ui")
    }

    #[test]
    fn default_theme_is_neural_nexus() {
        let config = UiConfig::default();
        assert_eq!(config.theme, "neural-nexus");
        assert_eq!(config.terminal_width_min, 80);
        assert_eq!(config.terminal_width_optimal, 120);
        assert_eq!(config.refresh_interval, 30);
    }

    #[test]
    fn empty_table_matches_default() {
        assert_eq!(parse("").unwrap(), UiConfig::default());
    }

    #[test]
    fn deserialize_color_mode() {
        let config = parse(r#"color_mode = "mono""#).unwrap();
        assert_eq!(config.color_mode, ColorMode::Mono);
        assert!(config.unicode_enabled);
    }

    #[test]
    fn unknown_color_mode_is_rejected() {
        let err = parse(r#"color_mode = "sepia""#).unwrap_err();
        assert_eq!(err.field(), "ui.color_mode");
    }

    #[test]
    fn negative_width_is_rejected() {
        let err = parse("terminal_width_min = -1").unwrap_err();
        assert_eq!(err.field(), "ui.terminal_width_min");
    }
}

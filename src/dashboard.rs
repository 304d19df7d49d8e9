//! Dashboard snapshot built from the active configuration.
//!
//! No usage data is fetched yet; the overview panel shows placeholders until
//! provider integrations exist.

use crate::config::{Config, ProviderConfig};

const NO_PROVIDERS_HINT: &str = "No providers configured\nUse 'tokentracktui providers --add' to configure providers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub title: String,
    pub provider_lines: Vec<String>,
    pub overview_lines: Vec<String>,
    pub status: String,
}

impl DashboardSnapshot {
    pub fn from_config(config: &Config) -> Self {
        let unicode = config.ui.unicode_enabled;
        let provider_lines = if config.providers.is_empty() {
            NO_PROVIDERS_HINT.lines().map(str::to_string).collect()
        } else {
            config
                .providers
                .iter()
                .map(|provider| provider_line(provider, unicode))
                .collect()
        };
        let enabled = config.enabled_providers().count();
        let separator = if unicode { "•" } else { "-" };
        Self {
            title: format!(
                "TokenTrackTUI {} {}",
                if unicode { "⬢" } else { "|" },
                crate::CODENAME
            ),
            provider_lines,
            overview_lines: vec![
                "Total Usage: --- tokens".to_string(),
                "Total Cost: $---.--".to_string(),
                format!("Active Providers: {enabled}"),
            ],
            status: format!("Ready {separator} {enabled} provider(s) configured"),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut out = vec![self.title.clone(), String::new(), "Providers".to_string()];
        out.extend(self.provider_lines.iter().map(|line| format!("  {line}")));
        out.push(String::new());
        out.push("Overview".to_string());
        out.extend(self.overview_lines.iter().map(|line| format!("  {line}")));
        out.push(String::new());
        out.push(self.status.clone());
        out.join("\n")
    }
}

fn provider_line(provider: &ProviderConfig, unicode: bool) -> String {
    let glyph = match (provider.enabled, unicode) {
        (true, true) => "◉",
        (false, true) => "○",
        (true, false) => "*",
        (false, false) => "-",
    };
    format!("{glyph} {} ({})", provider.name, provider.kind)
}

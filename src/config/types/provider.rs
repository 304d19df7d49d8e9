use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::super::error::SchemaError;
use super::super::schema::{Fields, FromTable};
use super::Extra;

/// Kind of usage source behind a provider entry.
///
/// Unrecognized kinds are kept as [`ProviderKind::Other`] so new sources can
/// be configured before this crate knows about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderKind {
    Mock,
    Gcp,
    OpenAi,
    Anthropic,
    Azure,
    Other(String),
}

impl ProviderKind {
    pub const KNOWN: [&'static str; 5] = ["mock", "gcp", "openai", "anthropic", "azure"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mock => "mock",
            Self::Gcp => "gcp",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Azure => "azure",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ProviderKind {
    fn from(raw: &str) -> Self {
        match raw {
            "mock" => Self::Mock,
            "gcp" => Self::Gcp,
            "openai" => Self::OpenAi,
            "anthropic" => Self::Anthropic,
            "azure" => Self::Azure,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ProviderKind {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider secrets. Values never show up in `Debug` output.
#[derive(Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, Value>);

impl Credentials {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|key| (key, "<redacted>")))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderConfig {
    /// Display label; not required to be unique
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    pub enabled: bool,
    pub credentials: Credentials,
    pub settings: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, kind: impl Into<ProviderKind>) -> Self {
        let kind = kind.into();
        warn_if_unknown(&kind);
        Self {
            name: name.into(),
            kind,
            enabled: true,
            credentials: Credentials::default(),
            settings: BTreeMap::new(),
            extra: Extra::new(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.credentials.insert(key, value);
        self
    }
}

impl FromTable for ProviderConfig {
    fn from_table_at(table: Table, at: &str) -> Result<Self, SchemaError> {
        let mut fields = Fields::new(table, at);
        let name = fields.required("name")?;
        let kind: ProviderKind = fields.required("type")?;
        warn_if_unknown(&kind);
        Ok(Self {
            name,
            kind,
            enabled: fields.or("enabled", true)?,
            credentials: fields.or_default("credentials")?,
            settings: fields.or_default("settings")?,
            extra: fields.into_extra(),
        })
    }
}

fn warn_if_unknown(kind: &ProviderKind) {
    if !kind.is_known() {
        log::warn!(
            "Unknown provider type: {kind}. Allowed: {:?}",
            ProviderKind::KNOWN
        );
    }
}

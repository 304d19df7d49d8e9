use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid TOML syntax in {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid TOML syntax in {}: file is not valid UTF-8 ({source})", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to save configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("No configuration loaded")]
    NotLoaded,
    #[error("missing home directory for config paths")]
    MissingHome,
}

/// A parsed table that does not fit the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("`{field}` must be a table")]
    NotATable { field: String },
}

impl SchemaError {
    /// Dotted path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::InvalidField { field, .. }
            | Self::NotATable { field } => field,
        }
    }
}

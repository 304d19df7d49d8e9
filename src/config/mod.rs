mod error;
mod load;
mod paths;
mod providers;
mod save;
mod schema;
mod store;
mod types;

pub use error::{ConfigError, SchemaError};
pub use load::ConfigSource;
pub use paths::{ConfigPaths, APP_DIR_NAME, CONFIG_FILE_NAME};
pub use schema::FromTable;
pub use store::ConfigStore;
pub use types::{
    AppConfig, ColorMode, Config, Credentials, Extra, LogLevel, ProviderConfig, ProviderKind,
    UiConfig,
};

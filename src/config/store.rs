use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::load::{read_config, ConfigSource, FileState};
use super::paths::ConfigPaths;
use super::save::save_config;
use super::types::Config;

/// Owner of the active configuration and its file on disk.
///
/// Starts unloaded. The first `load`, `get` or provider operation reads the
/// file, after which the store stays loaded for its lifetime.
#[derive(Debug)]
pub struct ConfigStore {
    paths: ConfigPaths,
    config: Option<Config>,
    source: Option<ConfigSource>,
}

impl ConfigStore {
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            config: None,
            source: None,
        }
    }

    /// Store at the platform default location, or under `dir_override`.
    pub fn open(dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self::new(ConfigPaths::resolve(dir_override)?))
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn config_file(&self) -> &Path {
        &self.paths.config_file
    }

    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// How the current configuration was obtained, if it came from `load`.
    pub fn source(&self) -> Option<&ConfigSource> {
        self.source.as_ref()
    }

    /// Reads the config file, bootstrapping it when absent.
    ///
    /// Syntax errors are returned and leave the store untouched. A file that
    /// parses but does not fit the schema is replaced by defaults in memory
    /// only, reported as [`ConfigSource::Recovered`].
    pub fn load(&mut self) -> Result<ConfigSource, ConfigError> {
        let path = &self.paths.config_file;
        let (config, source) = match read_config(path) {
            Ok(FileState::Missing) => {
                log::info!(
                    "Config file not found at {}, creating default",
                    path.display()
                );
                let config = Config::bootstrap();
                save_config(&config, &self.paths)?;
                (config, ConfigSource::Created)
            }
            Ok(FileState::Valid(config)) => {
                log::info!("Loaded configuration from {}", path.display());
                (config, ConfigSource::File)
            }
            Ok(FileState::Invalid(err)) => {
                log::warn!("Failed to load config: {err}");
                log::info!("Creating default configuration");
                (Config::bootstrap(), ConfigSource::Recovered(err))
            }
            Err(err) => {
                log::error!("{err}");
                return Err(err);
            }
        };
        self.config = Some(config);
        self.source = Some(source.clone());
        Ok(source)
    }

    /// Reads the file if it exists and is valid, without caching the result
    /// or writing defaults.
    pub fn peek(&self) -> Option<Config> {
        match read_config(&self.paths.config_file) {
            Ok(FileState::Valid(config)) => Some(config),
            _ => None,
        }
    }

    /// Current configuration, loading it on first use.
    pub fn get(&mut self) -> Result<&Config, ConfigError> {
        self.get_mut().map(|config| &*config)
    }

    pub(super) fn get_mut(&mut self) -> Result<&mut Config, ConfigError> {
        if self.config.is_none() {
            self.load()?;
        }
        self.config.as_mut().ok_or(ConfigError::NotLoaded)
    }

    /// Replaces the active configuration without touching the file.
    pub fn set(&mut self, config: Config) {
        self.config = Some(config);
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config = self.config.as_ref().ok_or(ConfigError::NotLoaded)?;
        match save_config(config, &self.paths) {
            Ok(()) => {
                log::info!("Configuration saved to {}", self.paths.config_file.display());
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to save config: {err}");
                Err(err)
            }
        }
    }

    /// Overwrites the file with the first-launch defaults.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = Some(Config::bootstrap());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::config::{ProviderConfig, ProviderKind, SchemaError};

    fn temp_store() -> (TempDir, ConfigStore) {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(ConfigPaths::in_dir(dir.path().join("cfg")));
        (dir, store)
    }

    #[test]
    fn load_creates_default_if_missing() {
        let (_dir, mut store) = temp_store();
        assert!(!store.config_file().exists());

        let source = store.load().unwrap();

        assert_eq!(source, ConfigSource::Created);
        assert!(store.config_file().exists());
        let config = store.get().unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].kind, ProviderKind::Mock);
    }

    #[test]
    fn save_and_load_round_trip() {
        let (_dir, mut store) = temp_store();
        let mut config = Config::bootstrap();
        config.ui.theme = "midnight".into();
        config.providers.push(
            ProviderConfig::new("Custom", "gcp")
                .with_setting("project_id", "p1")
                .with_credential("service_account", "sa.json"),
        );
        store.set(config.clone());
        store.save().unwrap();

        let mut reopened = ConfigStore::new(store.paths().clone());
        assert_eq!(reopened.load().unwrap(), ConfigSource::File);
        assert_eq!(reopened.get().unwrap(), &config);
    }

    #[test]
    fn invalid_toml_is_a_syntax_error() {
        let (_dir, mut store) = temp_store();
        fs::create_dir_all(&store.paths().config_dir).unwrap();
        fs::write(store.config_file(), "invalid toml content [[[").unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, ConfigError::Syntax { .. }));
        let message = err.to_string();
        assert!(message.starts_with("Invalid TOML syntax in"));
        assert!(message.contains("tokentracktui_config.toml"));
        assert!(!store.is_loaded());
    }

    #[test]
    fn non_utf8_file_names_path() {
        let (_dir, mut store) = temp_store();
        fs::create_dir_all(&store.paths().config_dir).unwrap();
        fs::write(store.config_file(), [0xff, 0xfe, b'a']).unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, ConfigError::Encoding { .. }));
        let message = err.to_string();
        assert!(message.starts_with("Invalid TOML syntax in"));
        assert!(message.contains("tokentracktui_config.toml"));
        assert!(!store.is_loaded());
    }

    #[test]
    fn schema_error_recovers_with_defaults() {
        let (_dir, mut store) = temp_store();
        fs::create_dir_all(&store.paths().config_dir).unwrap();
        let original = "[[providers]]\nname = 42\ntype = \"mock\"\n";
        fs::write(store.config_file(), original).unwrap();

        let source = store.load().unwrap();

        match source {
            ConfigSource::Recovered(SchemaError::InvalidField { field, .. }) => {
                assert_eq!(field, "providers[0].name")
            }
            other => panic!("unexpected source: {other:?}"),
        }
        assert_eq!(store.get().unwrap(), &Config::bootstrap());
        assert_eq!(fs::read_to_string(store.config_file()).unwrap(), original);
    }

    #[test]
    fn save_without_config_fails() {
        let (_dir, store) = temp_store();
        let err = store.save().unwrap_err();
        assert!(matches!(err, ConfigError::NotLoaded));
        assert_eq!(err.to_string(), "No configuration loaded");
    }

    #[test]
    fn get_loads_once() {
        let (_dir, mut store) = temp_store();
        assert!(store.source().is_none());
        let first = store.get().unwrap().clone();
        fs::write(store.config_file(), "version = \"9.9.9\"").unwrap();
        assert_eq!(store.get().unwrap(), &first);
        assert_eq!(store.source(), Some(&ConfigSource::Created));
    }

    #[test]
    fn peek_has_no_side_effects() {
        let (_dir, mut store) = temp_store();
        assert!(store.peek().is_none());
        assert!(!store.config_file().exists());
        assert!(!store.is_loaded());

        store.load().unwrap();
        let peeked = store.peek().unwrap();
        assert_eq!(&peeked, store.get().unwrap());
    }

    #[test]
    fn reset_restores_bootstrap() {
        let (_dir, mut store) = temp_store();
        store.set(Config::default());
        store.reset().unwrap();

        let mut reopened = ConfigStore::new(store.paths().clone());
        assert_eq!(reopened.get().unwrap(), &Config::bootstrap());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, mut store) = temp_store();
        store.load().unwrap();
        let mode = fs::metadata(store.config_file()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}

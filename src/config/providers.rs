use super::error::ConfigError;
use super::store::ConfigStore;
use super::types::ProviderConfig;

impl ConfigStore {
    /// Appends a provider. Names are not required to be unique, but a
    /// duplicate is logged since removal matches every provider by name.
    pub fn add_provider(&mut self, provider: ProviderConfig) -> Result<(), ConfigError> {
        let config = self.get_mut()?;
        if config.providers.iter().any(|p| p.name == provider.name) {
            log::warn!(
                "Provider name '{}' is already in use; removing by name will drop every match",
                provider.name
            );
        }
        log::info!("Added provider: {}", provider.name);
        config.providers.push(provider);
        Ok(())
    }

    /// Removes every provider called `name`. Returns whether any matched.
    pub fn remove_provider(&mut self, name: &str) -> Result<bool, ConfigError> {
        let config = self.get_mut()?;
        let before = config.providers.len();
        config.providers.retain(|provider| provider.name != name);
        let removed = config.providers.len() < before;
        if removed {
            log::info!("Removed provider: {name}");
        }
        Ok(removed)
    }

    pub fn find_provider(&mut self, name: &str) -> Result<Option<&ProviderConfig>, ConfigError> {
        Ok(self.get()?.providers.iter().find(|p| p.name == name))
    }

    /// Enabled providers in configuration order.
    pub fn enabled_providers(&mut self) -> Result<Vec<&ProviderConfig>, ConfigError> {
        Ok(self.get()?.enabled_providers().collect())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::{tempdir, TempDir};

    use crate::config::{Config, ConfigPaths, ConfigStore, ProviderConfig};

    fn store_with(providers: Vec<ProviderConfig>) -> (TempDir, ConfigStore) {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(ConfigPaths::in_dir(dir.path()));
        store.set(Config {
            providers,
            ..Config::default()
        });
        (dir, store)
    }

    fn names(store: &mut ConfigStore) -> Vec<String> {
        store
            .get()
            .unwrap()
            .providers
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn add_provider_loads_and_appends() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(ConfigPaths::in_dir(dir.path()));
        store
            .add_provider(ProviderConfig::new("Test Provider", "openai"))
            .unwrap();
        assert_eq!(names(&mut store), ["Mock Provider", "Test Provider"]);
    }

    #[test]
    fn duplicate_names_are_kept() {
        let (_dir, mut store) = store_with(vec![ProviderConfig::new("X", "mock")]);
        store.add_provider(ProviderConfig::new("X", "gcp")).unwrap();
        assert_eq!(names(&mut store), ["X", "X"]);
        assert!(store.remove_provider("X").unwrap());
        assert!(names(&mut store).is_empty());
    }

    #[test]
    fn remove_provider_reports_matches() {
        let (_dir, mut store) = store_with(vec![ProviderConfig::new("X", "mock")]);
        assert!(store.remove_provider("X").unwrap());
        assert!(names(&mut store).is_empty());
        assert!(!store.remove_provider("X").unwrap());
        assert!(names(&mut store).is_empty());
    }

    #[test]
    fn remove_is_exact_match() {
        let (_dir, mut store) = store_with(vec![
            ProviderConfig::new("OpenAI", "openai"),
            ProviderConfig::new("openai", "openai"),
        ]);
        assert!(store.remove_provider("OpenAI").unwrap());
        assert_eq!(names(&mut store), ["openai"]);
    }

    #[test]
    fn enabled_providers_preserve_order() {
        let (_dir, mut store) = store_with(vec![
            ProviderConfig::new("A", "mock"),
            ProviderConfig::new("B", "mock").with_enabled(false),
            ProviderConfig::new("C", "mock"),
        ]);
        let enabled: Vec<&str> = store
            .enabled_providers()
            .unwrap()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(enabled, ["A", "C"]);
    }

    #[test]
    fn find_provider_returns_first_match() {
        let (_dir, mut store) = store_with(vec![
            ProviderConfig::new("A", "mock"),
            ProviderConfig::new("A", "gcp"),
        ]);
        let found = store.find_provider("A").unwrap().unwrap();
        assert_eq!(found.kind.as_str(), "mock");
        assert!(store.find_provider("Z").unwrap().is_none());
    }
}

use std::fs;

use super::error::ConfigError;
use super::load::{ensure_dirs, secure_file_permissions};
use super::paths::ConfigPaths;
use super::types::Config;

pub(super) fn save_config(config: &Config, paths: &ConfigPaths) -> Result<(), ConfigError> {
    ensure_dirs(paths)?;
    let contents = config.to_toml_string()?;
    fs::write(&paths.config_file, contents)?;
    secure_file_permissions(&paths.config_file)?;
    Ok(())
}

use std::fs;
use std::io;
use std::path::Path;

use toml::Table;

use super::error::{ConfigError, SchemaError};
use super::paths::ConfigPaths;
use super::schema::FromTable;
use super::types::Config;

/// Where the configuration held by a store came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing, valid file.
    File,
    /// No file existed; defaults were written to disk.
    Created,
    /// The file parsed but did not fit the schema. Defaults are in use and
    /// the file on disk is left alone.
    Recovered(SchemaError),
}

pub(super) enum FileState {
    Missing,
    Valid(Config),
    Invalid(SchemaError),
}

pub(super) fn read_config(path: &Path) -> Result<FileState, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileState::Missing),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(ConfigError::Encoding {
                path: path.to_path_buf(),
                source: err,
            })
        }
        Err(err) => return Err(ConfigError::Io(err)),
    };
    let table: Table = toml::from_str(&contents).map_err(|source| ConfigError::Syntax {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match Config::from_table(table) {
        Ok(config) => FileState::Valid(config),
        Err(err) => FileState::Invalid(err),
    })
}

pub(super) fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.config_dir)?;
    Ok(())
}

pub(super) fn secure_file_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            let mode = perms.mode() & 0o777;
            if mode & 0o077 != 0 {
                perms.set_mode(0o600);
                fs::set_permissions(path, perms)?;
            }
        }
    }
    Ok(())
}

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::ConfigError;

pub const APP_DIR_NAME: &str = "tokentracktui";
pub const CONFIG_FILE_NAME: &str = "tokentracktui_config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub config_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    /// Resolves the config location, preferring an explicit directory over
    /// the platform default.
    pub fn resolve(dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(dir) = dir_override {
            let logs_dir = default_logs_dir().unwrap_or_else(|_| dir.join("logs"));
            return Ok(Self::from_dirs(dir, logs_dir));
        }
        Ok(Self::from_dirs(default_config_dir()?, default_logs_dir()?))
    }

    /// Keeps everything, logs included, under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let logs_dir = dir.join("logs");
        Self::from_dirs(dir, logs_dir)
    }

    fn from_dirs(config_dir: PathBuf, logs_dir: PathBuf) -> Self {
        Self {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
            logs_dir,
        }
    }
}

fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir();
    config_base(cfg!(windows), |key| env::var_os(key), home.as_deref())
        .map(|base| base.join(APP_DIR_NAME))
        .ok_or(ConfigError::MissingHome)
}

fn default_logs_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
    Ok(home
        .join(".local")
        .join("share")
        .join(APP_DIR_NAME)
        .join("logs"))
}

/// Base directory before the application subdirectory is appended.
fn config_base(
    windows: bool,
    env: impl Fn(&str) -> Option<OsString>,
    home: Option<&Path>,
) -> Option<PathBuf> {
    let (var, fallback): (&str, &[&str]) = if windows {
        ("APPDATA", &["AppData", "Roaming"])
    } else {
        ("XDG_CONFIG_HOME", &[".config"])
    };
    if let Some(value) = env(var).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    let mut base = home?.to_path_buf();
    base.extend(fallback);
    Some(base)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| OsString::from(value))
        }
    }

    #[rstest]
    #[case(false, &[("XDG_CONFIG_HOME", "/xdg")], "/xdg")]
    #[case(false, &[], "/home/u/.config")]
    #[case(false, &[("XDG_CONFIG_HOME", "")], "/home/u/.config")]
    #[case(false, &[("APPDATA", "/appdata")], "/home/u/.config")]
    #[case(true, &[("APPDATA", "/appdata")], "/appdata")]
    #[case(true, &[], "/home/u/AppData/Roaming")]
    fn resolves_platform_base(
        #[case] windows: bool,
        #[case] vars: &'static [(&'static str, &'static str)],
        #[case] expected: &str,
    ) {
        let base = config_base(windows, env_with(vars), Some(Path::new("/home/u")));
        assert_eq!(base, Some(PathBuf::from(expected)));
    }

    #[test]
    fn missing_home_without_override_yields_none() {
        assert_eq!(config_base(false, env_with(&[]), None), None);
    }

    #[test]
    fn explicit_dir_holds_config_file() {
        let paths = ConfigPaths::resolve(Some(PathBuf::from("/tmp/ttt"))).unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/tmp/ttt"));
        assert_eq!(
            paths.config_file,
            PathBuf::from("/tmp/ttt/tokentracktui_config.toml")
        );
    }

    #[test]
    fn in_dir_keeps_logs_alongside() {
        let paths = ConfigPaths::in_dir("/tmp/ttt");
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/ttt/logs"));
    }
}

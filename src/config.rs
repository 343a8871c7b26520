use crate::options::Options;
use serde::Deserialize;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Gameplay tuning
    #[serde(default)]
    pub(crate) game: Options,

    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("lerpsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                log::debug!("No configuration file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// Settings for the optional log file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogConfig {
    /// File to write log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    /// Name of the most verbose level to log, e.g. "info" or "debug"
    pub(crate) level: Option<String>,
}

impl LogConfig {
    /// Return the configured log level, or `None` if it is not set
    pub(crate) fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.level
            .as_deref()
            .map(|s| s.parse::<LevelFilter>().map_err(|_| ConfigError::LogLevel(s.to_owned())))
            .transpose()
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

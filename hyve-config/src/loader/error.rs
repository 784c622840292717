use crate::validation::ConfigGuardRailError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("invalid API URL '{value}'")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("failed to read config file {path}")]
    ConfigFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

pub mod error;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{debug, warn};
use url::Url;

use crate::{
    constants::{
        DEFAULT_ENV_FILE, ENV_API_URL, ENV_CONFIG_PATH, ENV_REQUEST_TIMEOUT,
    },
    models::{ClientConfig, ConfigMetadata, FileConfig, ValueSource},
    validation::{ConfigWarnings, apply_guard_rails},
};
use error::ConfigLoadError;

/// Resolved configuration plus any non-fatal findings.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: ClientConfig,
    pub warnings: ConfigWarnings,
}

/// Layered configuration loader.
///
/// Precedence, lowest first: built-in defaults, TOML file, `.env` file,
/// process environment, explicit overrides. Values from the `.env` file never
/// replace variables already present in the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    environment: Option<HashMap<String, String>>,
    api_url_override: Option<String>,
    timeout_override: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Use the given variables instead of the process environment. The
    /// implicit `./.env` lookup is skipped in this mode.
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        );
        self
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        self.api_url_override = url;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<String>) -> Self {
        self.timeout_override = timeout;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (mut env, env_file) = self.environment_snapshot()?;

        let config_path = self
            .config_path
            .clone()
            .or_else(|| env.remove(ENV_CONFIG_PATH).map(PathBuf::from));
        let file = match &config_path {
            Some(path) => read_config_file(path)?,
            None => FileConfig::default(),
        };

        let mut config = ClientConfig::default();
        let mut metadata = ConfigMetadata {
            config_path,
            env_file,
            ..Default::default()
        };

        if let Some((raw, source)) = pick(
            self.api_url_override.as_deref(),
            env.get(ENV_API_URL).map(String::as_str),
            file.api_url.as_deref(),
        ) {
            config.api_url = parse_api_url(raw)?;
            metadata.api_url_source = source;
        }

        if let Some((raw, source)) = pick(
            self.timeout_override.as_deref(),
            env.get(ENV_REQUEST_TIMEOUT).map(String::as_str),
            file.request_timeout.as_deref(),
        ) {
            config.request_timeout = parse_timeout(raw)?;
            metadata.request_timeout_source = source;
        }

        if let Some(images) = file.images {
            config.images = images;
        }
        config.metadata = metadata;

        let warnings = apply_guard_rails(&config)?;
        for warning in warnings.iter() {
            warn!(
                warning = %warning.message,
                hint = ?warning.hint,
                "configuration warning"
            );
        }

        debug!(
            api_url = %config.api_url,
            timeout = ?config.request_timeout,
            "configuration loaded"
        );

        Ok(ConfigLoad { config, warnings })
    }

    fn environment_snapshot(
        &self,
    ) -> Result<(HashMap<String, String>, Option<PathBuf>), ConfigLoadError>
    {
        let (mut env, env_file) = match &self.environment {
            Some(vars) => (vars.clone(), self.env_file.clone()),
            None => {
                let implicit = Path::new(DEFAULT_ENV_FILE);
                let file = self.env_file.clone().or_else(|| {
                    implicit.is_file().then(|| implicit.to_path_buf())
                });
                (std::env::vars().collect(), file)
            }
        };

        if let Some(path) = &env_file {
            for entry in dotenvy::from_path_iter(path)? {
                let (key, value) = entry?;
                env.entry(key).or_insert(value);
            }
        }

        Ok((env, env_file))
    }
}

fn pick<'a>(
    explicit: Option<&'a str>,
    environment: Option<&'a str>,
    file: Option<&'a str>,
) -> Option<(&'a str, ValueSource)> {
    let non_blank = |v: &&str| !v.trim().is_empty();
    explicit
        .filter(non_blank)
        .map(|v| (v, ValueSource::Override))
        .or_else(|| {
            environment
                .filter(non_blank)
                .map(|v| (v, ValueSource::Environment))
        })
        .or_else(|| file.filter(non_blank).map(|v| (v, ValueSource::File)))
}

fn read_config_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a base URL, adding `http://` when the scheme is missing.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    if with_scheme != raw {
        debug!(from = raw, to = %with_scheme, "normalized API URL");
    }
    Url::parse(&with_scheme).map_err(|source| ConfigLoadError::InvalidApiUrl {
        value: raw.to_string(),
        source,
    })
}

/// Parse a humantime duration (`10s`, `1m 30s`), or bare seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed).map_err(|source| {
        ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            source,
        }
    })
}

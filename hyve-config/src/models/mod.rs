use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::constants::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the recommendation service (no trailing slash).
    pub api_url: Url,
    /// Upper bound on one submission, connect through body.
    pub request_timeout: Duration,
    pub images: ImageConfig,
    pub metadata: ConfigMetadata,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            images: ImageConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }
}

impl ClientConfig {
    /// Base URL as text with any trailing slash removed.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is a valid URL")
}

/// Image table override for the card renderer.
///
/// Empty tables mean "use the built-in catalog".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// `"City, ST"` to image URL.
    pub locations: BTreeMap<String, String>,
    /// Rotation used when a location has no entry.
    pub defaults: Vec<String>,
}

impl ImageConfig {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.defaults.is_empty()
    }
}

/// Where each resolved value came from, for `hyvectl check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub api_url_source: ValueSource,
    pub request_timeout_source: ValueSource,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueSource {
    #[default]
    Default,
    File,
    Environment,
    Override,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ValueSource::Default => "default",
            ValueSource::File => "config file",
            ValueSource::Environment => "environment",
            ValueSource::Override => "command line",
        };
        f.write_str(label)
    }
}

/// On-disk TOML shape. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub request_timeout: Option<String>,
    pub images: Option<ImageConfig>,
}

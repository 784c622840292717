use std::time::Duration;

use thiserror::Error;

use crate::{
    constants::{MAX_REQUEST_TIMEOUT, SLOW_REQUEST_TIMEOUT},
    models::ClientConfig,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("API URL scheme '{scheme}' is not supported; use http or https")]
    UnsupportedScheme { scheme: String },
    #[error("API URL '{url}' has no host")]
    MissingHost { url: String },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("request timeout {timeout:?} exceeds the {max:?} ceiling")]
    TimeoutTooLong { timeout: Duration, max: Duration },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &ClientConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    let url = &config.api_url;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigGuardRailError::UnsupportedScheme {
                scheme: other.to_string(),
            });
        }
    }

    let Some(host) = url.host_str() else {
        return Err(ConfigGuardRailError::MissingHost {
            url: url.to_string(),
        });
    };

    if config.request_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroTimeout);
    }

    if config.request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(ConfigGuardRailError::TimeoutTooLong {
            timeout: config.request_timeout,
            max: MAX_REQUEST_TIMEOUT,
        });
    }

    if url.scheme() == "http" && !is_loopback_host(host) {
        warnings.push_with_hint(
            format!("API URL uses plain http for remote host '{host}'"),
            "Use https when the recommendation service is not on this machine",
        );
    }

    if config.request_timeout > SLOW_REQUEST_TIMEOUT {
        warnings.push_with_hint(
            format!(
                "request timeout of {}s will leave searches loading for a long time",
                config.request_timeout.as_secs()
            ),
            "The recommended bound is 10s; fallback data is shown once it elapses",
        );
    }

    if !config.images.locations.is_empty() && config.images.defaults.is_empty()
    {
        warnings.push(
            "image table has location entries but no defaults; unmatched cities render without an image",
        );
    }

    Ok(warnings)
}

fn is_loopback_host(host: &str) -> bool {
    let trimmed = host.trim_start_matches('[').trim_end_matches(']');
    trimmed.eq_ignore_ascii_case("localhost")
        || trimmed
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
}

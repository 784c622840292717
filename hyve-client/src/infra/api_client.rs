use hyve_config::ClientConfig;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Transport-level failure of a single HTTP exchange.
///
/// The search domain folds these into its four user-facing failure kinds;
/// see [`crate::domains::search::SearchFailure`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not reach {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend error: {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a failure raised before any HTTP status was received.
    fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
            }
        } else {
            ApiError::Connect {
                url: url.to_string(),
                source: err,
            }
        }
    }

    /// Classifies a failure raised while reading a successful response body.
    fn from_body(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
            }
        } else {
            ApiError::Decode(err.to_string())
        }
    }
}

/// JSON-over-HTTP client for the recommendation service.
///
/// Carries no overall request timeout of its own; the caller bounds each
/// exchange and signals the [`CancellationToken`] handed to
/// [`ApiClient::post_json`] when that bound expires.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        fn normalize(raw: String) -> String {
            let trimmed = raw.trim().trim_end_matches('/').to_string();
            let with_scheme = if trimmed.starts_with("http://")
                || trimmed.starts_with("https://")
            {
                trimmed
            } else {
                format!("http://{}", trimmed)
            };
            if with_scheme != raw {
                warn!(
                    "[ApiClient] Normalized base URL from '{}' to '{}'",
                    raw, with_scheme
                );
            }
            with_scheme
        }

        let base_url = normalize(base_url.into());
        let client = Client::builder()
            .user_agent(concat!("hyve-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    /// Create a client pointed at the configured service URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base())
    }

    /// Join a service path onto the base URL.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Returns [`ApiError::Cancelled`] as soon as `cancel` fires; the request
    /// future is dropped at that point, which releases its connection.
    pub async fn post_json<T, R>(
        &self,
        path: &str,
        body: &T,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|err| ApiError::from_send(&url, err))?;

            let status = response.status();
            if !status.is_success() {
                let status_text = reason_phrase(status);
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    status_text,
                    body,
                });
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|err| ApiError::from_body(&url, err))?;
            debug!(
                "[ApiClient] POST {} returned {} ({} bytes)",
                url,
                status,
                bytes.len()
            );
            serde_json::from_slice::<R>(&bytes)
                .map_err(|err| ApiError::Decode(err.to_string()))
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("[ApiClient] POST {} cancelled", url);
                Err(ApiError::Cancelled)
            }
            result = exchange => result,
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

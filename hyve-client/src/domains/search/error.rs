use std::time::Duration;

use thiserror::Error;

use crate::infra::api_client::ApiError;

/// Shown under every advisory while the fallback dataset is on screen.
pub const DEMO_DATA_NOTE: &str = "Make sure the backend server is running. \
The app is currently showing demo data.";

/// Why a search did not produce live results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchFailure {
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("could not connect to {endpoint}: {reason}")]
    ConnectionFailure { endpoint: String, reason: String },

    #[error("Backend error: {status} {status_text}")]
    ServerError { status: u16, status_text: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

/// Discriminant of [`SearchFailure`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Timeout,
    ConnectionFailure,
    ServerError,
    MalformedResponse,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::ConnectionFailure => "connection_failure",
            FailureKind::ServerError => "server_error",
            FailureKind::MalformedResponse => "malformed_response",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SearchFailure {
    /// Folds a transport error into one of the four failure kinds.
    ///
    /// `bound` is the coordinator's deadline; cancellation only happens
    /// when that deadline fires, so it is reported as a timeout.
    pub fn from_api(err: ApiError, bound: Duration, endpoint: &str) -> Self {
        match err {
            ApiError::Timeout { .. } | ApiError::Cancelled => {
                SearchFailure::Timeout { after: bound }
            }
            ApiError::Connect { source, .. } => {
                SearchFailure::ConnectionFailure {
                    endpoint: endpoint.to_string(),
                    reason: source.to_string(),
                }
            }
            ApiError::Client(source) => SearchFailure::ConnectionFailure {
                endpoint: endpoint.to_string(),
                reason: source.to_string(),
            },
            ApiError::Status {
                status,
                status_text,
                ..
            } => SearchFailure::ServerError {
                status,
                status_text,
            },
            ApiError::Decode(reason) => {
                SearchFailure::MalformedResponse { reason }
            }
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SearchFailure::Timeout { .. } => FailureKind::Timeout,
            SearchFailure::ConnectionFailure { .. } => {
                FailureKind::ConnectionFailure
            }
            SearchFailure::ServerError { .. } => FailureKind::ServerError,
            SearchFailure::MalformedResponse { .. } => {
                FailureKind::MalformedResponse
            }
        }
    }

    /// HTTP status, present only for [`SearchFailure::ServerError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchFailure::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable advisory shown alongside the fallback results.
    pub fn advisory(&self) -> String {
        match self {
            SearchFailure::Timeout { .. } => {
                "Request timed out. The backend server might not be running."
                    .to_string()
            }
            SearchFailure::ConnectionFailure { endpoint, .. } => format!(
                "Could not connect to the backend server. \
                 Please make sure it is running on {endpoint}."
            ),
            SearchFailure::ServerError { .. } => {
                format!("Failed to fetch recommendations: {self}")
            }
            SearchFailure::MalformedResponse { reason } => format!(
                "Failed to fetch recommendations: the server response \
                 could not be read ({reason})."
            ),
        }
    }
}

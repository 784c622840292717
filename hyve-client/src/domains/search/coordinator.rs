//! Bounded submission of a single search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use hyve_config::ClientConfig;
pub use hyve_config::constants::DEFAULT_REQUEST_TIMEOUT;
use hyve_model::{RecommendationRecord, SearchQuery};
use tokio_util::sync::CancellationToken;

use super::error::SearchFailure;
use super::types::SearchOutcome;
use crate::infra::api_client::{ApiClient, ApiError};
use crate::infra::services::api::RecommendationApi;

/// One outstanding call: its cancellation token plus a single-use
/// completion flag. The flag is settled when the response arrives; an
/// unsettled flight at expiry or drop cancels the transport.
#[derive(Debug)]
struct InFlight {
    token: CancellationToken,
    settled: AtomicBool,
}

impl InFlight {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            settled: AtomicBool::new(false),
        }
    }

    fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Returns true only for the first caller.
    fn settle(&self) -> bool {
        !self.settled.swap(true, Ordering::AcqRel)
    }

    fn expire(&self) -> bool {
        let won = self.settle();
        if won {
            self.token.cancel();
        }
        won
    }
}

impl Drop for InFlight {
    // Dropping the submit future mid-call abandons the request.
    fn drop(&mut self) {
        if self.settle() {
            self.token.cancel();
        }
    }
}

/// Issues recommendation requests with a fixed deadline and maps every
/// failure onto the fallback dataset.
///
/// Exactly one request is issued per [`submit`](Self::submit); there are no
/// retries.
#[derive(Debug, Clone)]
pub struct RequestCoordinator {
    api: Arc<dyn RecommendationApi>,
    timeout: Duration,
}

impl RequestCoordinator {
    pub fn new(api: Arc<dyn RecommendationApi>) -> Self {
        Self {
            api,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a coordinator backed by [`ApiClient`] from loaded settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = ApiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)).with_timeout(config.request_timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self) -> &str {
        self.api.base_url()
    }

    /// Submits `query` and resolves within the configured deadline.
    ///
    /// The query is expected to have passed
    /// [`SearchQuery::validate`](hyve_model::SearchQuery::validate) already.
    pub async fn submit(&self, query: &SearchQuery) -> SearchOutcome {
        let started = Instant::now();
        log::info!(
            "Submitting search to {} (timeout {:?}): budget={} job_title='{}' advanced={}",
            self.endpoint(),
            self.timeout,
            query.rent_budget,
            query.job_title,
            query.has_advanced_options()
        );

        match self.fetch(query).await {
            Ok(records) => {
                log::info!(
                    "Search returned {} recommendations in {:?}",
                    records.len(),
                    started.elapsed()
                );
                SearchOutcome::Success(records)
            }
            Err(failure) => {
                log::warn!(
                    "Search failed ({}) after {:?}: {}; showing demo data",
                    failure.kind(),
                    started.elapsed(),
                    failure
                );
                SearchOutcome::fallback(failure)
            }
        }
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RecommendationRecord>, SearchFailure> {
        let flight = InFlight::new();
        let call = self.api.fetch_recommendations(query, flight.token());
        let deadline = tokio::time::sleep(self.timeout);

        tokio::select! {
            result = call => {
                flight.settle();
                let records = result.map_err(|err| {
                    SearchFailure::from_api(err, self.timeout, self.endpoint())
                })?;
                inspect_records(&records);
                Ok(records)
            }
            _ = deadline => {
                flight.expire();
                Err(SearchFailure::Timeout { after: self.timeout })
            }
        }
    }
}

/// Logs records that break their field invariants.
///
/// A parsed body is always shown as returned: scores above 1 are normal when
/// the two weights sum past 1, and the charts clamp what they draw.
fn inspect_records(records: &[RecommendationRecord]) {
    for record in records {
        if let Err(err) = record.validate() {
            log::warn!("Keeping out-of-domain record: {err}");
        }
        if !record.percentage_matches_score() {
            log::warn!(
                "Score percentage '{}' for {} does not match score {}",
                record.score_percentage,
                record.location_label(),
                record.score
            );
        }
    }
}

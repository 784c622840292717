//! Recommendation service trait
//!
//! The search coordinator depends on this seam rather than on
//! [`ApiClient`] directly so tests can substitute scripted transports.

use async_trait::async_trait;
use hyve_model::{RecommendationRecord, SearchQuery};
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

use crate::infra::api_client::{ApiClient, ApiError};

/// Path of the recommendation endpoint relative to the service base URL.
pub const RECOMMENDATIONS_PATH: &str = "/api/recommendations";

#[async_trait]
pub trait RecommendationApi: Send + Sync + Debug {
    /// Submit a query and return the ordered recommendation list.
    ///
    /// Implementations must stop work and return promptly once `cancel`
    /// fires.
    async fn fetch_recommendations(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> Result<Vec<RecommendationRecord>, ApiError>;

    /// Base URL of the service, used in connection advisories.
    fn base_url(&self) -> &str;
}

#[async_trait]
impl RecommendationApi for ApiClient {
    async fn fetch_recommendations(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> Result<Vec<RecommendationRecord>, ApiError> {
        self.post_json(RECOMMENDATIONS_PATH, query, &cancel).await
    }

    fn base_url(&self) -> &str {
        ApiClient::base_url(self)
    }
}

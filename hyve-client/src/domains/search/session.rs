//! Page-level search state: the current records, the budget they were
//! requested with, the loading flag and the latest advisory.

use hyve_model::{RecommendationRecord, SearchQuery};

use super::coordinator::RequestCoordinator;
use super::error::FailureKind;
use super::types::SearchOutcome;
use crate::view_models::{ImageCatalog, RecommendationView};

/// Identifies one submission so a late outcome for an older one can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket(u64);

/// Clears the loading state if a [`SearchSession::search`] future is dropped
/// before its outcome is applied.
struct PendingSearch<'a> {
    session: &'a mut SearchSession,
    ticket: SearchTicket,
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        self.session.abandon(self.ticket);
    }
}

#[derive(Debug, Default)]
pub struct SearchSession {
    next_ticket: u64,
    in_flight: Option<SearchTicket>,
    records: Vec<RecommendationRecord>,
    rent_budget: f64,
    advisory: Option<String>,
    last_failure: Option<FailureKind>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submission is disabled while a request is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    /// Starts a submission. Returns `None` while another one is in flight.
    ///
    /// The budget is taken from `query` immediately and any previous
    /// advisory is cleared; existing records stay until the outcome lands.
    pub fn begin(&mut self, query: &SearchQuery) -> Option<SearchTicket> {
        if self.is_loading() {
            log::debug!("Ignoring submit while a search is in flight");
            return None;
        }

        self.next_ticket += 1;
        let ticket = SearchTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.rent_budget = query.rent_budget;
        self.advisory = None;
        self.last_failure = None;
        Some(ticket)
    }

    /// Applies the outcome of `ticket`, replacing the record list wholesale.
    ///
    /// Returns `false` and changes nothing when `ticket` is not the
    /// submission currently in flight.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: SearchOutcome,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            log::debug!("Dropping stale search outcome for {:?}", ticket);
            return false;
        }

        self.in_flight = None;
        self.last_failure = outcome.failure().map(|failure| failure.kind());
        self.advisory = outcome.advisory().map(str::to_owned);
        self.records = outcome.into_records();
        true
    }

    /// Clears the loading state of `ticket` without applying any outcome.
    pub fn abandon(&mut self, ticket: SearchTicket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    /// Runs one full submission through `coordinator`.
    ///
    /// Returns `false` without issuing a request if one is already loading.
    /// Dropping the returned future abandons the submission.
    pub async fn search(
        &mut self,
        coordinator: &RequestCoordinator,
        query: &SearchQuery,
    ) -> bool {
        let Some(ticket) = self.begin(query) else {
            return false;
        };
        let pending = PendingSearch {
            session: self,
            ticket,
        };
        let outcome = coordinator.submit(query).await;
        pending.session.complete(pending.ticket, outcome)
    }

    pub fn records(&self) -> &[RecommendationRecord] {
        &self.records
    }

    pub fn rent_budget(&self) -> f64 {
        self.rent_budget
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    /// Charts and cards for the current state; `None` renders nothing.
    pub fn view(&self, images: &dyn ImageCatalog) -> Option<RecommendationView> {
        RecommendationView::build(&self.records, self.rent_budget, images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::search::SearchFailure;
    use crate::infra::api_client::ApiError;
    use crate::infra::services::api::RecommendationApi;
    use async_trait::async_trait;
    use hyve_model::FALLBACK_LEN;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[derive(Debug)]
    struct NeverAnswers;

    #[async_trait]
    impl RecommendationApi for NeverAnswers {
        async fn fetch_recommendations(
            &self,
            _query: &SearchQuery,
            _cancel: CancellationToken,
        ) -> Result<Vec<RecommendationRecord>, ApiError> {
            std::future::pending().await
        }

        fn base_url(&self) -> &str {
            "http://never.test"
        }
    }

    fn query(budget: f64) -> SearchQuery {
        SearchQuery::new(budget, "Data Scientist").expect("valid query")
    }

    fn live(city: &str) -> RecommendationRecord {
        RecommendationRecord::new(city, "TX", 1500.0, 12, 0.8, "Good fit")
    }

    #[test]
    fn second_submit_is_refused_while_loading() {
        let mut session = SearchSession::new();
        let first = session.begin(&query(2000.0));
        assert!(first.is_some());
        assert!(session.is_loading());
        assert!(!session.can_submit());
        assert!(session.begin(&query(2500.0)).is_none());
        assert_eq!(session.rent_budget(), 2000.0);
    }

    #[test]
    fn completion_replaces_records_and_clears_loading() {
        let mut session = SearchSession::new();
        let ticket = session.begin(&query(1800.0)).expect("ticket");
        assert!(session.complete(
            ticket,
            SearchOutcome::Success(vec![live("Austin"), live("Houston")])
        ));
        assert!(!session.is_loading());
        assert_eq!(session.records().len(), 2);

        let ticket = session.begin(&query(1800.0)).expect("ticket");
        assert!(
            session.complete(ticket, SearchOutcome::Success(vec![live("Dallas")]))
        );
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].city, "Dallas");
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = SearchSession::new();
        let old = session.begin(&query(2000.0)).expect("ticket");
        session.abandon(old);
        let current = session.begin(&query(2100.0)).expect("ticket");

        assert!(!session.complete(old, SearchOutcome::Success(vec![live("Austin")])));
        assert!(session.is_loading());
        assert!(session.records().is_empty());

        assert!(session.complete(current, SearchOutcome::Success(Vec::new())));
        assert!(!session.is_loading());
    }

    #[test]
    fn fallback_sets_advisory_and_next_begin_clears_it() {
        let mut session = SearchSession::new();
        let ticket = session.begin(&query(2000.0)).expect("ticket");
        session.complete(
            ticket,
            SearchOutcome::fallback(SearchFailure::Timeout {
                after: Duration::from_secs(10),
            }),
        );
        assert_eq!(session.records().len(), FALLBACK_LEN);
        assert_eq!(session.last_failure(), Some(FailureKind::Timeout));
        assert!(session.advisory().is_some());

        session.begin(&query(2000.0)).expect("ticket");
        assert!(session.advisory().is_none());
        assert_eq!(session.records().len(), FALLBACK_LEN);
    }

    #[tokio::test]
    async fn dropped_search_clears_loading() {
        let coordinator = RequestCoordinator::new(Arc::new(NeverAnswers))
            .with_timeout(Duration::from_secs(60));
        let mut session = SearchSession::new();

        let cut_short = tokio::time::timeout(
            Duration::from_millis(20),
            session.search(&coordinator, &query(2000.0)),
        )
        .await;

        assert!(cut_short.is_err());
        assert!(!session.is_loading());
        assert!(session.can_submit());
        assert_eq!(session.rent_budget(), 2000.0);
        assert!(session.records().is_empty());
    }
}

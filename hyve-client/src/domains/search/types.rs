//! Search outcome types

use hyve_model::{RecommendationRecord, fallback_recommendations};

use super::error::SearchFailure;

/// Result of one submitted search. Never empty-handed: a failure carries
/// the fallback dataset and an advisory instead of an error value.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Live records in the order the service returned them.
    Success(Vec<RecommendationRecord>),
    /// Fallback records substituted after a failure.
    Fallback {
        records: Vec<RecommendationRecord>,
        failure: SearchFailure,
        advisory: String,
    },
}

impl SearchOutcome {
    /// Builds the fallback outcome for `failure`.
    pub fn fallback(failure: SearchFailure) -> Self {
        let advisory = failure.advisory();
        SearchOutcome::Fallback {
            records: fallback_recommendations(),
            failure,
            advisory,
        }
    }

    pub fn records(&self) -> &[RecommendationRecord] {
        match self {
            SearchOutcome::Success(records)
            | SearchOutcome::Fallback { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<RecommendationRecord> {
        match self {
            SearchOutcome::Success(records)
            | SearchOutcome::Fallback { records, .. } => records,
        }
    }

    pub fn advisory(&self) -> Option<&str> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Fallback { advisory, .. } => Some(advisory),
        }
    }

    pub fn failure(&self) -> Option<&SearchFailure> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Fallback { failure, .. } => Some(failure),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SearchOutcome::Fallback { .. })
    }
}

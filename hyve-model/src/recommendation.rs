//! One candidate location returned by the recommendation service.

use crate::error::{ModelError, Result};

/// Candidate location with its match score and supporting metrics.
///
/// Lists of records are kept in the order the service returned them, which is
/// descending `score`. Nothing on the client side re-sorts them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationRecord {
    pub city: String,
    pub state: String,
    pub avg_rent: f64,
    pub job_count: u64,
    /// Match quality in `[0, 1]`.
    pub score: f64,
    /// `score` rendered as a one-decimal percentage, e.g. `"95.3%"`.
    pub score_percentage: String,
    pub reason: String,
}

impl RecommendationRecord {
    /// Build a record, deriving `score_percentage` from `score`.
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        avg_rent: f64,
        job_count: u64,
        score: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            avg_rent,
            job_count,
            score,
            score_percentage: format_score_percentage(score),
            reason: reason.into(),
        }
    }

    /// `"City, ST"`, the key used for labels and image lookup.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// Whether the stored percentage text agrees with `score`.
    pub fn percentage_matches_score(&self) -> bool {
        self.score_percentage == format_score_percentage(self.score)
    }

    /// Check the numeric domains and the explanation text.
    pub fn validate(&self) -> Result<()> {
        if !self.avg_rent.is_finite() || self.avg_rent < 0.0 {
            return Err(self.invalid(
                "avg_rent",
                format!("must be non-negative, got {}", self.avg_rent),
            ));
        }

        if !(self.score.is_finite() && (0.0..=1.0).contains(&self.score)) {
            return Err(self.invalid(
                "score",
                format!("must be within [0, 1], got {}", self.score),
            ));
        }

        if self.reason.trim().is_empty() {
            return Err(self.invalid("reason", "must not be empty"));
        }

        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> ModelError {
        ModelError::InvalidRecord {
            location: self.location_label(),
            field,
            reason: reason.into(),
        }
    }
}

/// Format a `[0, 1]` score as a one-decimal percentage.
pub fn format_score_percentage(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

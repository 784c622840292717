//! Search criteria sent to the recommendation service.

use crate::error::{ModelError, Result};

/// User-specified search criteria for one submission.
///
/// Optional fields left as `None` are omitted from the serialized body so the
/// service applies its own defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchQuery {
    pub rent_budget: f64,
    pub job_title: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub rent_weight: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub job_weight: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub budget_threshold: Option<f64>,
}

impl SearchQuery {
    /// Query with only the required fields.
    pub fn new(rent_budget: f64, job_title: impl Into<String>) -> Result<Self> {
        Self::builder(rent_budget, job_title).build()
    }

    pub fn builder(
        rent_budget: f64,
        job_title: impl Into<String>,
    ) -> SearchQueryBuilder {
        SearchQueryBuilder::new(rent_budget, job_title)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if !self.rent_budget.is_finite() || self.rent_budget <= 0.0 {
            return Err(ModelError::query(
                "rent_budget",
                format!("must be a positive number, got {}", self.rent_budget),
            ));
        }

        if self.job_title.trim().is_empty() {
            return Err(ModelError::query("job_title", "must not be empty"));
        }

        check_unit_closed("rent_weight", self.rent_weight)?;
        check_unit_closed("job_weight", self.job_weight)?;

        if let Some(threshold) = self.budget_threshold
            && !(threshold.is_finite() && threshold > 0.0 && threshold < 1.0)
        {
            return Err(ModelError::query(
                "budget_threshold",
                format!("must be strictly between 0 and 1, got {threshold}"),
            ));
        }

        Ok(())
    }

    /// True when any of the weighting/threshold fields is set.
    pub fn has_advanced_options(&self) -> bool {
        self.rent_weight.is_some()
            || self.job_weight.is_some()
            || self.budget_threshold.is_some()
    }
}

fn check_unit_closed(field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !(v.is_finite() && (0.0..=1.0).contains(&v)) => Err(
            ModelError::query(field, format!("must be within [0, 1], got {v}")),
        ),
        _ => Ok(()),
    }
}

/// Builder for [`SearchQuery`]; `build` runs validation.
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    pub fn new(rent_budget: f64, job_title: impl Into<String>) -> Self {
        Self {
            query: SearchQuery {
                rent_budget,
                job_title: job_title.into().trim().to_string(),
                rent_weight: None,
                job_weight: None,
                budget_threshold: None,
            },
        }
    }

    pub fn rent_weight(mut self, weight: f64) -> Self {
        self.query.rent_weight = Some(weight);
        self
    }

    pub fn job_weight(mut self, weight: f64) -> Self {
        self.query.job_weight = Some(weight);
        self
    }

    pub fn weights(self, rent: f64, job: f64) -> Self {
        self.rent_weight(rent).job_weight(job)
    }

    pub fn budget_threshold(mut self, threshold: f64) -> Self {
        self.query.budget_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<SearchQuery> {
        self.query.validate()?;
        Ok(self.query)
    }
}

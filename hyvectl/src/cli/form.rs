use anyhow::{Result, bail};
use dialoguer::{Confirm, Input};
use hyve_model::SearchQuery;

use super::Term;
use super::args::SearchArgs;

pub const DEFAULT_BUDGET: f64 = 2000.0;
pub const DEFAULT_JOB_TITLE: &str = "Data Scientist";
pub const MIN_BUDGET: f64 = 500.0;
pub const MAX_BUDGET: f64 = 10_000.0;
pub const DEFAULT_RENT_WEIGHT: f64 = 0.5;
pub const DEFAULT_JOB_WEIGHT: f64 = 0.5;
pub const DEFAULT_BUDGET_THRESHOLD: f64 = 0.3;

/// The search form as the user filled it in.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub budget: f64,
    pub job_title: String,
    pub advanced: bool,
    pub rent_weight: f64,
    pub job_weight: f64,
    pub budget_threshold: f64,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            job_title: DEFAULT_JOB_TITLE.to_string(),
            advanced: false,
            rent_weight: DEFAULT_RENT_WEIGHT,
            job_weight: DEFAULT_JOB_WEIGHT,
            budget_threshold: DEFAULT_BUDGET_THRESHOLD,
        }
    }
}

impl SearchForm {
    /// Any explicit weighting flag opens the advanced panel.
    pub fn from_args(args: &SearchArgs) -> Self {
        let advanced = args.advanced
            || args.rent_weight.is_some()
            || args.job_weight.is_some()
            || args.budget_threshold.is_some();
        Self {
            budget: args.budget,
            job_title: args.job_title.clone(),
            advanced,
            rent_weight: args.rent_weight.unwrap_or(DEFAULT_RENT_WEIGHT),
            job_weight: args.job_weight.unwrap_or(DEFAULT_JOB_WEIGHT),
            budget_threshold: args
                .budget_threshold
                .unwrap_or(DEFAULT_BUDGET_THRESHOLD),
        }
    }

    /// Walks the form interactively, starting from the current values.
    pub fn prompt(&mut self) -> Result<()> {
        let term = Term::stderr();
        self.budget = Input::new()
            .with_prompt(format!(
                "Monthly rent budget (${MIN_BUDGET:.0} to ${MAX_BUDGET:.0})"
            ))
            .default(self.budget)
            .validate_with(|value: &f64| -> Result<(), String> {
                check_budget(*value).map_err(|err| err.to_string())
            })
            .interact_text_on(&term)?;
        self.job_title = Input::new()
            .with_prompt("Job title")
            .default(self.job_title.clone())
            .validate_with(|value: &String| -> Result<(), &str> {
                if value.trim().is_empty() {
                    Err("job title must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text_on(&term)?;
        self.advanced = Confirm::new()
            .with_prompt("Show advanced options?")
            .default(self.advanced)
            .interact_on(&term)?;

        if self.advanced {
            self.rent_weight = Input::new()
                .with_prompt("Rent weight (0 to 1)")
                .default(self.rent_weight)
                .interact_text_on(&term)?;
            self.job_weight = Input::new()
                .with_prompt("Job weight (0 to 1)")
                .default(self.job_weight)
                .interact_text_on(&term)?;
            self.budget_threshold = Input::new()
                .with_prompt("Budget threshold (between 0 and 1)")
                .default(self.budget_threshold)
                .interact_text_on(&term)?;
        }
        Ok(())
    }

    /// Validates the form and builds the query to submit.
    ///
    /// Advanced values are only included when the advanced panel is open.
    pub fn to_query(&self) -> Result<SearchQuery> {
        check_budget(self.budget)?;
        let mut builder = SearchQuery::builder(self.budget, &self.job_title);
        if self.advanced {
            builder = builder
                .weights(self.rent_weight, self.job_weight)
                .budget_threshold(self.budget_threshold);
        }
        Ok(builder.build()?)
    }
}

fn check_budget(budget: f64) -> Result<()> {
    if !(MIN_BUDGET..=MAX_BUDGET).contains(&budget) {
        bail!(
            "rent budget must be between {MIN_BUDGET:.0} and {MAX_BUDGET:.0}, got {budget}"
        );
    }
    Ok(())
}

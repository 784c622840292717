use std::path::PathBuf;

use clap::Args;

use super::form::{DEFAULT_BUDGET, DEFAULT_JOB_TITLE};

/// Configuration sources shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// TOML configuration file (defaults to $HYVE_CONFIG when set)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Dotenv file to read instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
    /// Recommendation service base URL, overrides $HYVE_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Request timeout such as "10s" or "1500ms", overrides $HYVE_REQUEST_TIMEOUT
    #[arg(long, global = true)]
    pub timeout: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Maximum monthly rent in dollars (500 to 10000)
    #[arg(long, default_value_t = DEFAULT_BUDGET)]
    pub budget: f64,
    /// Job title to look for
    #[arg(long, default_value = DEFAULT_JOB_TITLE)]
    pub job_title: String,
    /// Send the advanced weighting options (defaults 0.5 / 0.5 / 0.3)
    #[arg(long)]
    pub advanced: bool,
    /// Importance of affordable rent, 0 to 1
    #[arg(long)]
    pub rent_weight: Option<f64>,
    /// Importance of job availability, 0 to 1
    #[arg(long)]
    pub job_weight: Option<f64>,
    /// Budget threshold, above 0 and below 1
    #[arg(long)]
    pub budget_threshold: Option<f64>,
    /// Fill in the search form with prompts
    #[arg(long, short)]
    pub interactive: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write score_chart.svg and rent_scatter.svg into this directory
    #[arg(long)]
    pub chart_dir: Option<PathBuf>,
    /// Print the records as JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

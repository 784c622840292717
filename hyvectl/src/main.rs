//! `hyvectl`: search for places to live from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hyve_client::domains::search::{RequestCoordinator, SearchSession};
use hyve_client::view_models::{RecommendationView, StaticImageCatalog};
use hyve_config::{ConfigLoad, ConfigLoader};
use hyve_model::fallback_recommendations;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{
    ConfigArgs, OutputArgs, SearchArgs, SearchForm, print_check_report,
    print_outcome, print_view,
};

#[derive(Parser)]
#[command(
    name = "hyvectl",
    version,
    about = "Find locations that balance rent and job opportunities"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the recommendation service for locations
    Search(SearchArgs),
    /// Show the built-in demo recommendations without contacting the service
    Demo {
        /// Rent budget drawn as the dashed line on the scatter chart
        #[arg(long, default_value_t = cli::DEFAULT_BUDGET)]
        budget: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load and validate configuration, then print where each value came from
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => {
            let load = load_config(&cli.config)?;
            run_search(load, args).await
        }
        Command::Demo { budget, output } => {
            let load = load_config(&cli.config)?;
            let images = StaticImageCatalog::from_config(&load.config.images);
            let records = fallback_recommendations();
            let view = RecommendationView::build(&records, budget, &images);
            print_view(&records, view.as_ref(), None, &output)
        }
        Command::Check => {
            let load = load_config(&cli.config)?;
            print_check_report(&load);
            Ok(())
        }
    }
}

fn load_config(args: &ConfigArgs) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new()
        .with_api_url(args.api_url.clone())
        .with_request_timeout(args.timeout.clone());
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }
    loader.load().context("failed to load hyvectl configuration")
}

async fn run_search(load: ConfigLoad, args: SearchArgs) -> Result<()> {
    let mut form = SearchForm::from_args(&args);
    if args.interactive {
        form.prompt()?;
    }
    let query = form.to_query()?;

    let coordinator = RequestCoordinator::from_config(&load.config)
        .context("failed to build the recommendation client")?;
    tracing::info!(
        endpoint = coordinator.endpoint(),
        timeout = ?coordinator.timeout(),
        "searching"
    );

    let images = StaticImageCatalog::from_config(&load.config.images);
    let mut session = SearchSession::new();
    session.search(&coordinator, &query).await;

    print_outcome(&session, &images, &args.output)
}

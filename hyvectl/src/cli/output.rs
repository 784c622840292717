use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hyve_client::domains::search::{DEMO_DATA_NOTE, SearchSession};
use hyve_client::rendering::{render_rent_scatter, render_score_chart};
use hyve_client::view_models::{CityCard, RecommendationView, StaticImageCatalog};
use hyve_config::ConfigLoad;
use hyve_model::RecommendationRecord;
use serde::Serialize;

pub const SCORE_CHART_FILE: &str = "score_chart.svg";
pub const RENT_SCATTER_FILE: &str = "rent_scatter.svg";
const FOOTER: &str = "HYVE Location Recommendation System";

#[derive(Serialize)]
struct JsonReport<'a> {
    fallback: bool,
    advisory: Option<&'a str>,
    recommendations: &'a [RecommendationRecord],
}

/// Prints whatever the session currently holds.
pub fn print_outcome(
    session: &SearchSession,
    images: &StaticImageCatalog,
    output: &super::OutputArgs,
) -> Result<()> {
    let view = session.view(images);
    print_view(session.records(), view.as_ref(), session.advisory(), output)
}

pub fn print_view(
    records: &[RecommendationRecord],
    view: Option<&RecommendationView>,
    advisory: Option<&str>,
    output: &super::OutputArgs,
) -> Result<()> {
    if let (Some(dir), Some(view)) = (&output.chart_dir, view) {
        let written = write_charts(dir, view)?;
        for path in written {
            tracing::info!(path = %path.display(), "wrote chart");
        }
    }

    if output.json {
        let report = JsonReport {
            fallback: advisory.is_some(),
            advisory,
            recommendations: records,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .context("failed to serialize recommendations")?
        );
        return Ok(());
    }

    if let Some(advisory) = advisory {
        println!("Error: {advisory}");
        println!("{DEMO_DATA_NOTE}");
        println!();
    }

    match view {
        Some(view) => {
            println!("Your Recommended Locations");
            println!();
            for card in &view.cards {
                print_card(card);
            }
        }
        None => println!("No recommendations found."),
    }

    println!();
    println!("{FOOTER}");
    Ok(())
}

fn print_card(card: &CityCard) {
    println!("#{} {}  ({} match)", card.rank, card.title, card.score_percentage);
    println!(
        "   Avg. Rent: {:<12} Job Count: {}",
        card.average_rent, card.job_count
    );
    println!("   {}", card.reason);
    if let Some(url) = &card.image_url {
        println!("   Image: {url}");
    }
    println!();
}

/// Writes both charts into `dir`, creating it when missing.
pub fn write_charts(dir: &Path, view: &RecommendationView) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let charts = [
        (SCORE_CHART_FILE, render_score_chart(&view.score_chart)),
        (RENT_SCATTER_FILE, render_rent_scatter(&view.rent_scatter)),
    ];
    let mut written = Vec::with_capacity(charts.len());
    for (name, svg) in charts {
        let path = dir.join(name);
        fs::write(&path, svg)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub fn print_check_report(load: &ConfigLoad) {
    let config = &load.config;
    let meta = &config.metadata;

    println!("API URL:          {} ({})", config.api_base(), meta.api_url_source);
    println!(
        "Request timeout:  {:?} ({})",
        config.request_timeout, meta.request_timeout_source
    );
    match &meta.config_path {
        Some(path) => println!("Config file:      {}", path.display()),
        None => println!("Config file:      none"),
    }
    match &meta.env_file {
        Some(path) => println!("Env file:         {}", path.display()),
        None => println!("Env file:         none"),
    }
    if config.images.is_empty() {
        println!("Images:           built-in catalog");
    } else {
        println!(
            "Images:           {} locations, {} defaults",
            config.images.locations.len(),
            config.images.defaults.len()
        );
    }

    if load.warnings.is_empty() {
        println!("Configuration OK");
        return;
    }
    println!("{} warning(s):", load.warnings.len());
    for warning in load.warnings.iter() {
        println!("  - {}", warning.message);
        if let Some(hint) = &warning.hint {
            println!("    hint: {hint}");
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, routing::post};
use hyve_client::prelude::*;
use hyve_client::rendering::{render_rent_scatter, render_score_chart};
use serde_json::json;

fn images() -> StaticImageCatalog {
    StaticImageCatalog::builtin()
}

#[test]
fn empty_results_render_nothing() {
    let session = SearchSession::new();
    assert!(session.view(&images()).is_none());
}

#[tokio::test]
async fn empty_success_response_renders_nothing() {
    let app = Router::new().route(
        "/api/recommendations",
        post(|| async { Json(json!([])) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let coordinator = RequestCoordinator::new(Arc::new(
        ApiClient::new(format!("http://{addr}")).expect("client"),
    ))
    .with_timeout(Duration::from_secs(5));

    let mut session = SearchSession::new();
    let query = SearchQuery::new(2000.0, "Data Scientist").expect("query");
    assert!(session.search(&coordinator, &query).await);

    assert!(!session.is_loading());
    assert!(session.advisory().is_none());
    assert!(session.last_failure().is_none());
    assert!(session.records().is_empty());
    assert!(session.view(&images()).is_none());
}

#[test]
fn oversized_score_still_draws() {
    let mut record = fallback_recommendations()[0].clone();
    record.score = 1.35;
    record.score_percentage = "135.0%".to_string();

    let view = RecommendationView::build(&[record], 2000.0, &images()).expect("view");
    let bar = &view.score_chart.bars[0];

    assert!((bar.value - 135.0).abs() < 1e-9);
    assert_eq!(bar.y, view.score_chart.y_axis.pixel_top);
    assert_eq!(view.rent_scatter.points[0].tooltip[3], "Match Score: 135.0%");
}

#[test]
fn budget_change_moves_only_the_budget_line() {
    let records = fallback_recommendations();
    let mut section = ChartSection::default();

    let low = section
        .update(&records, 1950.0, &images())
        .cloned()
        .expect("view for non-empty records");
    let high = section
        .update(&records, 2300.0, &images())
        .cloned()
        .expect("view for non-empty records");

    assert_eq!(section.generation(), 2);
    assert_eq!(low.score_chart, high.score_chart);
    assert_eq!(low.rent_scatter.points, high.rent_scatter.points);
    assert_eq!(low.rent_scatter.y_axis, high.rent_scatter.y_axis);
    assert_eq!(low.cards, high.cards);
    // Pixel rows grow downwards, so a higher budget sits higher up.
    assert!(high.rent_scatter.budget_line.y < low.rent_scatter.budget_line.y);
}

#[test]
fn budget_line_is_monotonic_in_budget() {
    let records = fallback_recommendations();
    let ys: Vec<f64> = [1800.0, 1900.0, 2000.0, 2200.0, 2500.0]
        .into_iter()
        .map(|budget| {
            RecommendationView::build(&records, budget, &images())
                .expect("view")
                .rent_scatter
                .budget_line
                .y
        })
        .collect();
    assert!(ys.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn fallback_view_shows_demo_cities() {
    let view = RecommendationView::build(&fallback_recommendations(), 2000.0, &images())
        .expect("view");

    assert_eq!(view.cards.len(), FALLBACK_LEN);
    assert_eq!(view.cards[0].title, "Seattle, WA");
    assert_eq!(view.cards[0].score_percentage, "95.3%");
    assert_eq!(view.rent_scatter.points[0].tooltip[3], "Match Score: 95.3%");

    let bar_svg = render_score_chart(&view.score_chart);
    let scatter_svg = render_rent_scatter(&view.rent_scatter);
    assert!(bar_svg.contains("Seattle, WA"));
    assert!(scatter_svg.contains("Your Budget: $2,000"));
}

#[tokio::test]
async fn session_applies_live_results_then_fallback() {
    let app = Router::new().route(
        "/api/recommendations",
        post(|| async {
            Json(json!([{
                "city": "Austin",
                "state": "TX",
                "avg_rent": 1650.0,
                "job_count": 42,
                "score": 0.61,
                "score_percentage": "61.0%",
                "reason": "Affordable with steady hiring",
            }]))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let live = RequestCoordinator::new(Arc::new(
        ApiClient::new(format!("http://{addr}")).expect("client"),
    ))
    .with_timeout(Duration::from_secs(5));

    let mut session = SearchSession::new();
    let query = SearchQuery::new(1700.0, "Teacher").expect("query");
    assert!(session.search(&live, &query).await);
    assert!(!session.is_loading());
    assert_eq!(session.records().len(), 1);
    assert_eq!(session.rent_budget(), 1700.0);
    assert!(session.advisory().is_none());

    let dead = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);
        RequestCoordinator::new(Arc::new(
            ApiClient::new(format!("http://{addr}")).expect("client"),
        ))
        .with_timeout(Duration::from_secs(5))
    };
    assert!(session.search(&dead, &query).await);
    assert_eq!(session.records().len(), FALLBACK_LEN);
    assert_eq!(session.last_failure(), Some(FailureKind::ConnectionFailure));
    assert!(session.advisory().is_some());
    assert!(session.view(&images()).is_some());
}

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::post};
use hyve_client::prelude::*;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test app");
    });
    format!("http://{addr}")
}

fn coordinator(base_url: &str, timeout: Duration) -> RequestCoordinator {
    let client = ApiClient::new(base_url).expect("build client");
    RequestCoordinator::new(Arc::new(client)).with_timeout(timeout)
}

fn query() -> SearchQuery {
    SearchQuery::new(2000.0, "Data Scientist").expect("valid query")
}

fn record_json(city: &str, state: &str, rent: f64, jobs: u64, score: f64) -> Value {
    json!({
        "city": city,
        "state": state,
        "avg_rent": rent,
        "job_count": jobs,
        "score": score,
        "score_percentage": format_score_percentage(score),
        "reason": format!("{city} fits the search"),
    })
}

#[tokio::test]
async fn success_keeps_server_order_and_sends_basic_body() {
    let seen = Arc::new(Mutex::new(Vec::<Value>::new()));
    let recorder = seen.clone();
    let app = Router::new().route(
        "/api/recommendations",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().expect("lock").push(body);
                Json(json!([
                    record_json("Austin", "TX", 1650.0, 42, 0.61),
                    record_json("Atlanta", "GA", 1500.0, 80, 0.88),
                    record_json("Chicago", "IL", 1900.0, 120, 0.47),
                ]))
            }
        }),
    );
    let base = spawn_server(app).await;

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query()).await;

    let cities: Vec<&str> =
        outcome.records().iter().map(|r| r.city.as_str()).collect();
    assert_eq!(cities, ["Austin", "Atlanta", "Chicago"]);
    assert!(!outcome.is_fallback());

    let bodies = seen.lock().expect("lock");
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({ "rent_budget": 2000.0, "job_title": "Data Scientist" })
    );
}

#[tokio::test]
async fn advanced_options_are_sent_when_set() {
    let seen = Arc::new(Mutex::new(None::<Value>));
    let recorder = seen.clone();
    let app = Router::new().route(
        "/api/recommendations",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().expect("lock") = Some(body);
                Json(json!([]))
            }
        }),
    );
    let base = spawn_server(app).await;
    let query = SearchQuery::builder(1800.0, "Nurse")
        .weights(0.7, 0.3)
        .budget_threshold(0.25)
        .build()
        .expect("valid query");

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query).await;

    assert_eq!(outcome, SearchOutcome::Success(Vec::new()));
    let body = seen.lock().expect("lock").clone().expect("request body");
    assert_eq!(body["rent_weight"], json!(0.7));
    assert_eq!(body["job_weight"], json!(0.3));
    assert_eq!(body["budget_threshold"], json!(0.25));
}

#[tokio::test]
async fn server_error_falls_back_after_one_attempt() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/api/recommendations",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
            }
        }),
    );
    let base = spawn_server(app).await;

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query()).await;

    assert_eq!(
        outcome.failure(),
        Some(&SearchFailure::ServerError {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        })
    );
    assert_eq!(outcome.records(), fallback_recommendations().as_slice());
    assert_eq!(
        outcome.advisory(),
        Some("Failed to fetch recommendations: Backend error: 500 Internal Server Error")
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let app = Router::new().route(
        "/api/recommendations",
        post(|| async { "this is not json" }),
    );
    let base = spawn_server(app).await;

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query()).await;

    assert_eq!(
        outcome.failure().map(SearchFailure::kind),
        Some(FailureKind::MalformedResponse)
    );
    assert_eq!(outcome.records().len(), FALLBACK_LEN);
}

#[tokio::test]
async fn heavy_weights_keep_scores_above_one() {
    let app = Router::new().route(
        "/api/recommendations",
        post(|| async {
            Json(json!([
                record_json("Austin", "TX", 1650.0, 42, 1.35),
                record_json("Boise", "ID", 1400.0, 12, 0.9),
            ]))
        }),
    );
    let base = spawn_server(app).await;
    let query = SearchQuery::builder(2000.0, "Data Scientist")
        .weights(0.9, 0.9)
        .build()
        .expect("valid query");

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query).await;

    assert!(!outcome.is_fallback());
    assert!(outcome.advisory().is_none());
    let records = outcome.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].city, "Austin");
    assert_eq!(records[0].score, 1.35);
    assert_eq!(records[0].score_percentage, "135.0%");
}

#[tokio::test]
async fn refused_connection_names_the_endpoint() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    let base = format!("http://{addr}");

    let outcome = coordinator(&base, Duration::from_secs(5)).submit(&query()).await;

    assert_eq!(
        outcome.failure().map(SearchFailure::kind),
        Some(FailureKind::ConnectionFailure)
    );
    assert_eq!(
        outcome.advisory(),
        Some(
            format!(
                "Could not connect to the backend server. Please make sure it is running on {base}."
            )
            .as_str()
        )
    );
    assert_eq!(outcome.records().len(), FALLBACK_LEN);
}

#[tokio::test]
async fn slow_server_times_out_within_bound() {
    let app = Router::new().route(
        "/api/recommendations",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!([]))
        }),
    );
    let base = spawn_server(app).await;
    let bound = Duration::from_millis(300);

    let started = Instant::now();
    let outcome = coordinator(&base, bound).submit(&query()).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.failure(), Some(&SearchFailure::Timeout { after: bound }));
    assert_eq!(
        outcome.advisory(),
        Some("Request timed out. The backend server might not be running.")
    );
    assert!(elapsed >= bound);
    assert!(elapsed < bound + Duration::from_secs(2), "took {elapsed:?}");
}

#[derive(Debug, Default)]
struct Hanging {
    cancelled: Arc<AtomicBool>,
}

#[async_trait]
impl RecommendationApi for Hanging {
    async fn fetch_recommendations(
        &self,
        _query: &SearchQuery,
        cancel: CancellationToken,
    ) -> Result<Vec<RecommendationRecord>, ApiError> {
        let flag = self.cancelled.clone();
        tokio::spawn(async move {
            cancel.cancelled().await;
            flag.store(true, Ordering::SeqCst);
        });
        futures::future::pending().await
    }

    fn base_url(&self) -> &str {
        "http://hanging.test"
    }
}

#[tokio::test]
async fn deadline_signals_cancellation_to_transport() {
    let api = Arc::new(Hanging::default());
    let coordinator =
        RequestCoordinator::new(api.clone()).with_timeout(Duration::from_millis(50));

    let outcome = coordinator.submit(&query()).await;
    assert_eq!(
        outcome.failure().map(SearchFailure::kind),
        Some(FailureKind::Timeout)
    );

    for _ in 0..50 {
        if api.cancelled.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(api.cancelled.load(Ordering::SeqCst));
}

#[tokio::test]
async fn advisories_differ_across_failure_kinds() {
    let app = Router::new()
        .route(
            "/api/recommendations",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
    let server_error_base = spawn_server(app).await;
    let malformed_base = spawn_server(Router::new().route(
        "/api/recommendations",
        post(|| async { "{" }),
    ))
    .await;

    let server_error = coordinator(&server_error_base, Duration::from_secs(5))
        .submit(&query())
        .await;
    let malformed = coordinator(&malformed_base, Duration::from_secs(5))
        .submit(&query())
        .await;
    let timed_out = RequestCoordinator::new(Arc::new(Hanging::default()))
        .with_timeout(Duration::from_millis(20))
        .submit(&query())
        .await;

    let advisories = [
        server_error.advisory().expect("advisory"),
        malformed.advisory().expect("advisory"),
        timed_out.advisory().expect("advisory"),
    ];
    assert_ne!(advisories[0], advisories[1]);
    assert_ne!(advisories[1], advisories[2]);
    assert_ne!(advisories[0], advisories[2]);
    assert!(advisories[0].contains("502 Bad Gateway"));
}

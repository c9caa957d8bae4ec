//! Performance benchmarks for the shift pay engine.
//!
//! Covers direct engine calls and the HTTP path:
//! - Pricing one 24h guard with interventions
//! - Pricing through `/activities/calculate`
//! - A month summary through `/activities/summary`
//! - Scaling with activity length, which should track breakpoints, not minutes
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use shift_pay_engine::api::{AppState, create_router};
use shift_pay_engine::calculation::{RateTable, calculate_activity_pay};
use shift_pay_engine::config::ConfigLoader;
use shift_pay_engine::models::{Activity, Grade, Worker};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

/// Creates a 24h guard starting at 08:00 on `date` with three interventions.
fn create_guard(id: &str, date: &str, next_date: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "activity_type": "g24",
        "start": format!("{}T08:00:00", date),
        "end": format!("{}T08:00:00", next_date),
        "interventions": [
            { "id": format!("{}-a", id), "start": format!("{}T10:15:00", date), "end": format!("{}T11:40:00", date), "motif": "SAP" },
            { "id": format!("{}-b", id), "start": format!("{}T21:30:00", date), "end": format!("{}T23:10:00", date), "motif": "INC" },
            { "id": format!("{}-c", id), "start": format!("{}T03:05:00", next_date), "end": format!("{}T04:00:00", next_date), "motif": "AVP" }
        ]
    })
}

fn create_activity(days: i64) -> Activity {
    let mut activity: Activity =
        serde_json::from_value(create_guard("activity-1", "2023-10-28", "2023-10-29"))
            .expect("Failed to create activity");
    activity.end = activity.start + chrono::Duration::days(days);
    activity
}

/// Benchmark: Single 24h guard priced directly.
fn bench_single_activity(c: &mut Criterion) {
    let activity = create_activity(1);
    let worker = Worker::new("user-1", Grade::Sergent);
    let rates = RateTable::default();

    c.bench_function("single_activity", |b| {
        b.iter(|| black_box(calculate_activity_pay(black_box(&activity), &worker, &rates)))
    });
}

/// Benchmark: Single 24h guard through the HTTP router.
fn bench_single_activity_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "worker": { "id": "user-1", "grade": "sergent" },
        "activity": create_guard("activity-1", "2023-10-28", "2023-10-29")
    })
    .to_string();

    c.bench_function("single_activity_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/activities/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Month summary of 30 guards.
fn bench_month_summary(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let activities: Vec<serde_json::Value> = (1..=30)
        .map(|day| {
            create_guard(
                &format!("activity-{}", day),
                &format!("2023-11-{:02}", day),
                &format!("2023-{}", if day == 30 { "12-01".to_string() } else { format!("11-{:02}", day + 1) }),
            )
        })
        .collect();
    let body = serde_json::json!({
        "worker": { "id": "user-1", "grade": "caporal" },
        "month": "2023-11",
        "activities": activities
    })
    .to_string();

    let mut group = c.benchmark_group("summary");
    group.throughput(Throughput::Elements(30));

    group.bench_function("month_30_guards", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/activities/summary")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

/// Benchmark: Activity length to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let worker = Worker::new("user-1", Grade::Lieutenant);
    let rates = RateTable::default();

    let mut group = c.benchmark_group("scaling");

    for days in [1, 2, 4, 7, 14].iter() {
        let activity = create_activity(*days);

        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::new("days", days), days, |b, _| {
            b.iter(|| black_box(calculate_activity_pay(&activity, &worker, &rates)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_activity,
    bench_single_activity_http,
    bench_month_summary,
    bench_scaling,
);
criterion_main!(benches);

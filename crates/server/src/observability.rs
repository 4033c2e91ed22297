use std::future::Future;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feature_store_requests_total",
        "Feature requests by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register requests_total")
});

pub static STORAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "feature_store_storage_duration_seconds",
        "Storage call duration in seconds",
        &["op"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register storage_duration")
});

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_CLIENT_ERROR: &str = "client_error";
pub const OUTCOME_SERVER_ERROR: &str = "server_error";

pub fn record(op: &str, outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[op, outcome]).inc();
}

/// Time a service call and count its outcome.
/// Client errors never reached storage, so their duration is dropped.
pub async fn observe<T, F>(op: &'static str, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let timer = STORAGE_DURATION.with_label_values(&[op]).start_timer();
    let res = fut.await;
    let outcome = match &res {
        Ok(_) => OUTCOME_OK,
        Err(e) if e.is_client_error() => OUTCOME_CLIENT_ERROR,
        Err(_) => OUTCOME_SERVER_ERROR,
    };
    if outcome == OUTCOME_CLIENT_ERROR {
        timer.stop_and_discard();
    } else {
        timer.observe_duration();
    }
    record(op, outcome);
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> impl IntoResponse {
    let (status, body) = encode_metrics();
    (status, [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(op: &str) -> u64 {
        STORAGE_DURATION.with_label_values(&[op]).get_sample_count()
    }

    fn count(op: &str, outcome: &str) -> u64 {
        REQUESTS_TOTAL.with_label_values(&[op, outcome]).get()
    }

    #[tokio::test]
    async fn client_errors_are_counted_but_not_timed() {
        let op = "observe_client_error";
        let res: Result<(), _> = observe(op, async { Err(ServiceError::Validation("bad".into())) }).await;
        assert!(res.is_err());
        assert_eq!(count(op, OUTCOME_CLIENT_ERROR), 1);
        assert_eq!(samples(op), 0);
    }

    #[tokio::test]
    async fn storage_calls_are_timed() {
        let op = "observe_storage";
        observe(op, async { Ok::<_, ServiceError>(()) }).await.unwrap();
        let _ = observe(op, async { Err::<(), _>(ServiceError::Db("down".into())) }).await;
        assert_eq!(count(op, OUTCOME_OK), 1);
        assert_eq!(count(op, OUTCOME_SERVER_ERROR), 1);
        assert_eq!(samples(op), 2);
    }
}

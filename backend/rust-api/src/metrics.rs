use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref SCORES_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "scores_submitted_total",
        "Total number of game scores submitted",
        &["game"]
    )
    .unwrap();

    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answers_submitted_total",
        "Total number of daily question answers submitted",
        &["correct"]
    )
    .unwrap();

    pub static ref POSTS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "posts_created_total",
        "Total number of posts created",
        &["filtered"]
    )
    .unwrap();

    pub static ref OTPS_ISSUED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "otps_issued_total",
        "Total number of one-time passwords issued",
        &["delivery"]
    )
    .unwrap();
}

pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

pub fn record_score_submitted(game: &str) {
    SCORES_SUBMITTED_TOTAL.with_label_values(&[game]).inc();
}

pub fn record_answer_submitted(correct: bool) {
    let label = if correct { "true" } else { "false" };
    ANSWERS_SUBMITTED_TOTAL.with_label_values(&[label]).inc();
}

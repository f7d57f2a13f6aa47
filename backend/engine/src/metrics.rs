use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // Business Metrics
    pub static ref SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assessment_sessions_total",
        "Total number of assessment sessions",
        &["status"]
    )
    .unwrap();

    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "assessment_sessions_active",
        "Number of currently active assessment sessions"
    )
    .unwrap();

    pub static ref ANSWERS_SCORED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assessment_answers_scored_total",
        "Total number of spoken answers scored",
        &["correct"]
    )
    .unwrap();

    pub static ref TRANSCRIPTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "assessment_transcriptions_total",
        "Total number of transcription collaborator calls",
        &["status"]
    )
    .unwrap();
}

pub fn record_answer_scored(correct: bool) {
    let correct_label = if correct { "true" } else { "false" };
    ANSWERS_SCORED_TOTAL
        .with_label_values(&[correct_label])
        .inc();
}

pub fn record_transcription(status: &str) {
    TRANSCRIPTIONS_TOTAL.with_label_values(&[status]).inc();
}

/// Renders all registered metrics in Prometheus text format so the external
/// shell can expose or scrape them.
pub fn export() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

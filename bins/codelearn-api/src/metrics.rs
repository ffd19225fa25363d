// Prometheus metrics for the CodeLearn API

use lazy_static::lazy_static;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

lazy_static! {
    pub static ref SUBMISSIONS_TOTAL: IntCounter = register_int_counter!(
        "codelearn_submissions_total",
        "Total submissions received"
    )
    .expect("metric can be registered");
    pub static ref SUBMISSIONS_PASSED: IntCounter = register_int_counter!(
        "codelearn_submissions_passed_total",
        "Submissions that reached the passing score"
    )
    .expect("metric can be registered");
    pub static ref SETUP_ERRORS_TOTAL: IntCounter = register_int_counter!(
        "codelearn_setup_errors_total",
        "Submissions rejected for malformed evaluation configuration"
    )
    .expect("metric can be registered");
}

/// Encode the default registry in Prometheus text format.
pub fn exposition() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

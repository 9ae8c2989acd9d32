//! Per-call API metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding binary installs a recorder.

use metrics::{counter, histogram};

/// Record one completed (or failed) API call.
///
/// `status` is `None` when no response was received.
pub fn record_api_call(method: &str, path: &str, status: Option<u16>, duration_secs: f64) {
    let path = normalize_path(path);
    let status = status.map_or_else(|| "transport_error".to_string(), |s| s.to_string());

    counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "api_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path
    )
    .record(duration_secs);
}

/// Replace numeric path segments with `:id` to keep label cardinality low
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

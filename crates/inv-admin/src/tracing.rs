//! Logging setup for the admin console
//!
//! Logs go to stderr so that rendered tables on stdout stay clean.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// File name prefix of the daily log files written under `INV_LOG_DIR`
pub const LOG_FILE_PREFIX: &str = "inv-admin.log";

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed, human-readable logs
/// - Default level: INFO, DEBUG for the admin crates
/// - Shows file locations and line numbers
///
/// # Production Mode
/// - JSON-formatted structured logs
/// - Default level: WARN
///
/// When `log_dir` is set, JSON logs are additionally written to a daily
/// rolling file there. Keep the returned guard alive until exit or buffered
/// lines are lost.
///
/// # Environment Variables
/// - `RUST_LOG`: Override default log level (e.g., `RUST_LOG=inv_client=trace`)
pub fn init_tracing(env: &Environment, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let default_filter = if env.is_development() {
        "info,inv_admin=debug,inv_client=debug,reqwest=warn,hyper_util=warn"
    } else {
        "warn,reqwest=warn,hyper_util=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .flatten_event(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        development = env.is_development(),
        file_logging = guard.is_some(),
        "Tracing initialized"
    );
    guard
}

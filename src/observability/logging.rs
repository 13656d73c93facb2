use std::fs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::common::error::{ReportError, Result};

/// Open the daily-rotated JSON log file under `log_dir`, creating the directory.
pub fn open_log_appender(log_dir: &str) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("bilesu_report")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| {
            ReportError::Config(format!("cannot open log file in '{}': {}", log_dir, e))
        })
}

/// Initializes the logging system with console output, plus a JSON file when
/// `log_dir` is writable.
pub fn init_logging(log_dir: &str) {
    let (file_layer, file_error) = match open_log_appender(log_dir) {
        Ok(appender) => {
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(appender);
            // Keep the guard alive so buffered lines are flushed on exit
            std::mem::forget(guard);
            (Some(fmt::layer().json().with_writer(non_blocking_writer)), None)
        }
        Err(e) => (None, Some(e)),
    };
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise info for our crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bilesu_report=info,warn"));

    // try_init so a second call (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "file logging disabled, console only");
    }
}

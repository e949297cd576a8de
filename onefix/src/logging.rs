//! Logging infrastructure for OneFix.
//!
//! Structured `tracing` output, configurable via the `RUST_LOG`
//! environment variable. Two entry points:
//!
//! - [`init_console_logging`] - stderr only, for CLI use
//! - [`init_logging`] - stderr plus a non-blocking log file

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize console-only logging on stderr.
///
/// `default_level` applies when `RUST_LOG` is not set. Safe to call only
/// once per process; a second call returns an error from the subscriber.
pub fn init_console_logging(default_level: &str) -> Result<(), String> {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| e.to_string())
}

/// Initialize logging to stderr and a log file.
///
/// The previous log file is truncated at session start.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log
/// file cannot be truncated.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(Path::new(log_dir).join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .compact();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

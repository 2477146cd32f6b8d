//! Run logging
//!
//! Log lines go to a file under `log_dir` and, in text mode, to stderr.
//! stdout carries only the one-line run summary. A log directory that cannot
//! be created is not fatal: the run continues with stderr logging only.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// `never` and unknown values keep a single file.
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Open the log file appender described by `config`.
///
/// # Errors
/// Fails when `log_dir` cannot be created or the log file cannot be opened.
pub fn file_appender(config: &AppConfig) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(rotation(&config.rotation))
        .filename_prefix(&config.log_file)
        .build(&config.log_dir)
        .with_context(|| format!("Cannot open log file in {}", config.log_dir))
}

/// Install the global subscriber.
///
/// Returns the file writer guard; keep it alive until exit or buffered lines
/// are lost. `None` means the file could not be opened and only stderr is
/// logged to.
pub fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        fmt::layer().with_target(false).with_writer(std::io::stderr)
    }

    let appender = match file_appender(config) {
        Ok(appender) => appender,
        Err(err) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer())
                .init();
            tracing::warn!(target: "CONFIG", "File logging disabled: {err:#}");
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let registry = tracing_subscriber::registry().with(filter);
    if config.use_json {
        registry
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .with(stderr_layer())
            .init();
    }

    Some(guard)
}

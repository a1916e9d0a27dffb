//! Centralized logging infrastructure.
//!
//! One-time setup of the structured logging pipeline:
//! - console sink: colorized line format, DEBUG when configured level is
//!   "debug" (otherwise INFO), synchronous
//! - `log.log` file sink: INFO and above, 10 MB size rotation, 30-day
//!   retention, written through a non-blocking worker
//! - `error.log` file sink: same policy, ERROR and above
//! - `log`-crate bridge: records from libraries using the `log` facade are
//!   re-emitted through this pipeline with level and call site preserved
//! - every line is enriched with the active [`RequestId`]

mod correlation;
mod format;
mod rolling;

pub use correlation::RequestId;
pub use rolling::RollingFileWriter;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use format::LineFormat;

/// File receiving INFO-and-above records.
pub const INFO_LOG_FILE: &str = "log.log";

/// File receiving ERROR-and-above records.
pub const ERROR_LOG_FILE: &str = "error.log";

/// Size threshold at which the active log file rotates.
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// How long rotated files are kept before pruning.
const LOG_RETENTION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Logging configuration. Set once at startup, read-only afterward.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Configured log level; "debug" unlocks DEBUG console output
    pub level: String,
    /// Directory receiving `log.log` / `error.log` and rotated files
    pub directory: PathBuf,
}

/// Keeps the non-blocking file writers alive.
///
/// Must be held for the lifetime of the process so buffered records are
/// flushed on shutdown.
#[must_use]
pub struct LogGuard {
    file_guards: Vec<WorkerGuard>,
}

impl LogGuard {
    /// Number of file sinks this guard owns (zero for the no-op guard
    /// returned by repeated initialization).
    pub fn file_sink_count(&self) -> usize {
        self.file_guards.len()
    }
}

/// Whether the pipeline has been installed.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Initialize the logging pipeline.
///
/// Idempotent: the first call installs the sinks; later calls change
/// nothing and return a guard owning no sinks. A missing log directory
/// that cannot be created is a startup error, as is failing to install
/// the subscriber.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(LogGuard {
            file_guards: Vec::new(),
        });
    }

    match build_pipeline(config) {
        Ok(guard) => Ok(guard),
        Err(e) => {
            INITIALIZED.store(false, Ordering::SeqCst);
            Err(e)
        }
    }
}

fn build_pipeline(config: &LogConfig) -> Result<LogGuard> {
    // Redirect `log` facade records into tracing. Fails only if a logger
    // is already installed, which means the bridge is in place.
    let _ = tracing_log::LogTracer::init();

    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!("Failed to create log directory: {:?}", config.directory)
    })?;

    // RUST_LOG takes precedence over the configured level
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.level.eq_ignore_ascii_case("debug") {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let console_layer = fmt::layer()
        .event_format(LineFormat::new(true))
        .with_filter(console_filter);

    let info_writer = RollingFileWriter::new(
        &config.directory,
        INFO_LOG_FILE,
        MAX_LOG_FILE_SIZE,
        LOG_RETENTION,
    )
    .with_context(|| format!("Failed to open {:?}", config.directory.join(INFO_LOG_FILE)))?;
    let (info_writer, info_guard) = tracing_appender::non_blocking(info_writer);
    let info_layer = fmt::layer()
        .event_format(LineFormat::new(false))
        .with_writer(info_writer)
        .with_filter(LevelFilter::INFO);

    let error_writer = RollingFileWriter::new(
        &config.directory,
        ERROR_LOG_FILE,
        MAX_LOG_FILE_SIZE,
        LOG_RETENTION,
    )
    .with_context(|| format!("Failed to open {:?}", config.directory.join(ERROR_LOG_FILE)))?;
    let (error_writer, error_guard) = tracing_appender::non_blocking(error_writer);
    let error_layer = fmt::layer()
        .event_format(LineFormat::new(false))
        .with_writer(error_writer)
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logging subscriber: {}", e))?;

    Ok(LogGuard {
        file_guards: vec![info_guard, error_guard],
    })
}

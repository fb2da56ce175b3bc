//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/depmelody/depmelody.log` (or platform
//! equivalent) with 10 MB size-based rotation. The filter level comes from
//! the settings file; stdout only carries warnings so the console stays
//! usable.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize logging.
///
/// Returns a `WorkerGuard` that must be held for the application lifetime so
/// buffered logs are flushed on shutdown. Falls back to stdout-only logging
/// when the log directory cannot be created.
pub fn init(level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("depmelody"),
        None => {
            init_stdout_only(level);
            return None;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber is not up yet, so this goes straight to stderr.
        eprintln!(
            "Failed to create log directory {:?}: {}, using stdout only",
            log_dir, e
        );
        init_stdout_only(level);
        return None;
    }

    let log_path = log_dir.join("depmelody.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stdout_only(level);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(filter(level));

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    tracing::info!(log_file = ?log_path, level, "depmelody logging initialized");

    Some(guard)
}

fn init_stdout_only(level: &str) {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(filter(level));

    tracing_subscriber::registry().with(stdout_layer).init();

    tracing::info!(level, "depmelody logging initialized (stdout only)");
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

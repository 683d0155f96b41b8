use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Logging options
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level, RUST_LOG directives take precedence
    pub level: LevelFilter,
    /// Write logs to stderr
    pub console_output: bool,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

/// Handle to keep the logging worker thread alive
pub struct LogGuard {
    // Kept alive until dropped
    _guard: WorkerGuard,
}

/// Initialize the logging system
pub fn init(config: &LogConfig) -> Result<Option<LogGuard>> {
    let config_filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    // stdout carries the status line, logs go to stderr
    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .with_filter(config_filter.clone())
    });

    let (file_layer, guard) = match &config.file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
            }
            let file = File::create(log_path)
                .with_context(|| format!("Failed to create log file: {:?}", log_path))?;

            let (non_blocking, worker_guard) = tracing_appender::non_blocking(file);

            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(config_filter);

            (
                Some(layer),
                Some(LogGuard {
                    _guard: worker_guard,
                }),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized at level: {}", config.level);
    if let Some(path) = &config.file {
        tracing::info!("Log file path: {:?}", path);
    }

    Ok(guard)
}

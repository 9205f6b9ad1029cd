//! Logging configuration
//!
//! Console output goes to stderr so rendered manifests on stdout stay clean.

use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,              // trace, debug, info, warn, error
    pub log_dir: Option<PathBuf>,   // JSON log files, rotated daily
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Filter used by the subscriber; `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes the file writer and must be held until exit.
    pub fn init(&self) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
        let console_layer = fmt::layer()
            .with_target(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(io::stderr);

        let guard = match self.log_dir {
            Some(ref dir) => {
                let (writer, guard) = non_blocking(rolling::daily(dir, "etcdpod.log"));

                let file_layer = fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .json()
                    .with_writer(writer);

                tracing_subscriber::registry()
                    .with(self.env_filter())
                    .with(console_layer)
                    .with(file_layer)
                    .try_init()?;

                Some(guard)
            }
            None => {
                tracing_subscriber::registry()
                    .with(self.env_filter())
                    .with(console_layer)
                    .try_init()?;

                None
            }
        };

        tracing::debug!(level = %self.level, "Logging initialized");

        Ok(guard)
    }
}

//! Logging System
//!
//! Structured logging via the `tracing` crate. The store itself only emits
//! events; embedders decide whether to install this subscriber or their own.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// The `PLAYGROUND_LOG` environment variable takes priority over the
/// configured level and accepts full `EnvFilter` directives.
pub fn init_logging(config: Option<&LoggingConfig>) {
    let filter = EnvFilter::try_from_env("PLAYGROUND_LOG").unwrap_or_else(|_| {
        let level = config.map(|c| c.level.as_str()).unwrap_or("info");
        EnvFilter::new(level)
    });

    let base_subscriber = Registry::default().with(filter);

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    let use_color = config.map(|c| c.color).unwrap_or(true);

    if format == "json" {
        base_subscriber
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        base_subscriber
            .with(fmt::layer().with_target(true).with_ansi(use_color))
            .init();
    }
}

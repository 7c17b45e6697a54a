//! # Structured Logging
//!
//! Environment-aware `tracing` initialization. Honors `RUST_LOG` when set,
//! otherwise derives a default level from the deployment environment, and
//! switches to JSON output when `PUBFLOW_LOG_FORMAT=json` for log shippers.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process.
///
/// Safe to call repeatedly, including when an embedding application has
/// already installed a global subscriber.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = detect_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(&environment)));

        let json = std::env::var("PUBFLOW_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true);

        let already_set = if json {
            builder.json().try_init().is_err()
        } else {
            builder.try_init().is_err()
        };

        if already_set {
            tracing::debug!("global tracing subscriber already initialized, keeping existing one");
        } else {
            tracing::info!(environment = %environment, "structured logging initialized");
        }
    });
}

/// Current deployment environment from environment variables.
fn detect_environment() -> String {
    std::env::var("PUBFLOW_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Default log level for an environment when `RUST_LOG` is unset.
fn default_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

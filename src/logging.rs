//! # Structured Logging Module
//!
//! Environment-aware structured logging for job lifecycle events, plus the
//! per-job log sink that completion reports are written through.

use crate::config::LoggingConfig;
use crate::models::JobId;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Destination for the messages a job emits about its own outcome.
///
/// Injected per job so completion reporting can be observed without touching
/// the global `tracing` dispatcher.
pub trait JobLogSink: Send + Sync {
    fn info(&self, job_id: &JobId, message: &str);

    fn error(&self, job_id: &JobId, message: &str);
}

/// Forwards job messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl JobLogSink for TracingLogSink {
    fn info(&self, job_id: &JobId, message: &str) {
        tracing::info!(job_id = %job_id, "{message}");
    }

    fn error(&self, job_id: &JobId, message: &str) {
        tracing::error!(job_id = %job_id, "{message}");
    }
}

/// Initialize structured logging from configuration.
///
/// Only the first call installs a subscriber. If another global subscriber
/// was already set (by an embedding application) it is left in place.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment));

        let console = fmt::layer()
            .with_target(true)
            .with_thread_ids(config.with_thread_ids)
            .with_level(true);

        let layer = if config.json {
            console
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        } else {
            console
                .with_ansi(true)
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = config.json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
pub fn get_environment() -> String {
    std::env::var("TASKER_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
pub fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "debug");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        init_structured_logging(&config);
        init_structured_logging(&config);
        assert!(LOGGER_INITIALIZED.get().is_some());
    }
}

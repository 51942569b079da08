//! Logging initialization.

use std::sync::Once;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
    Layer,
};

use super::types::LoggerConfig;

/// Filter with `default_level` as the fallback, overridable via `RUST_LOG`.
fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Installs the global subscriber, returning an error if one is already set.
pub fn try_init(config: LoggerConfig) -> Result<(), TryInitError> {
    let filt = env_filter(config.default_level);

    // Configure stdout logging with JSON or compact format
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(service_name = %config.service_name, "logging initialized");
    Ok(())
}

/// Initializes the logging subsystem with the provided config.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(config: LoggerConfig) {
    if let Err(e) = try_init(config) {
        panic!("init: failed to install logging subscriber: {e}");
    }
}

/// Installs a test-friendly subscriber once per process.
///
/// Output goes through the test harness's capture, so it only shows for failing tests. Safe to
/// call from every test.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Another crate's test setup may have won the race; that subscriber is fine too.
        let _ = tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter(Level::DEBUG))
            .with_test_writer()
            .try_init();
    });
}

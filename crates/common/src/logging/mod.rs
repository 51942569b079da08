//! Logging subsystem built on `tracing`.

pub mod manager;
pub mod types;


pub use manager::{init, init_test_logging, try_init};
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;

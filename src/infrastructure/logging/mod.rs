//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - Optional JSON log file via tracing-appender
//! - `RUST_LOG` overrides

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};

//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//!
//! Store and converter implementations live in `crate::adapters`.

pub mod config;
pub mod logging;

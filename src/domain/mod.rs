//! Domain layer for the issue synchronizer
//!
//! This module contains the event, property and page models, the domain
//! error type, and the port traits adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};

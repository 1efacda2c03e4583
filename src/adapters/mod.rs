//! Infrastructure adapters for external systems.

pub mod markdown;
pub mod notion;

//! Port trait definitions (Hexagonal Architecture)
//!
//! - PageStore: record store operations (schema, query, create, update, append)
//! - ContentConverter: issue body to blocks / property value
//!
//! Adapters under `crate::adapters` implement these; tests swap in fakes.

pub mod content_converter;
pub mod page_store;

pub use content_converter::{ContentConverter, ConversionContext};
pub use page_store::PageStore;

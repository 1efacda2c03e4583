//! Notion store adapter.
//!
//! Implements the [`PageStore`](crate::domain::ports::PageStore) port
//! against the Notion REST API: database schema retrieval, database
//! queries, page creation and update, and block children appends.

pub mod client;
pub mod models;

pub use client::NotionClient;

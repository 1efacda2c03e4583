//! Record store port.
//!
//! The synchronizer talks to the external document store exclusively
//! through this trait. Every method is a single network round trip; callers
//! await them one at a time and never retry.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Block, DatabaseSchema, NumberEqualsQuery, PageId, PropertySet};

/// Port for the store holding one page per synchronized issue.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Retrieve the property schema of `database_id`.
    async fn retrieve_database(&self, database_id: &str) -> DomainResult<DatabaseSchema>;

    /// Return the ids of pages in `database_id` matching `query`, in store order.
    ///
    /// An empty vector is a normal result, not an error.
    async fn query_database(
        &self,
        database_id: &str,
        query: &NumberEqualsQuery,
    ) -> DomainResult<Vec<PageId>>;

    /// Create a page under `database_id` and return its store-assigned id.
    async fn create_page(
        &self,
        database_id: &str,
        properties: &PropertySet,
    ) -> DomainResult<PageId>;

    /// Replace the listed properties of an existing page.
    async fn update_page(&self, page_id: &PageId, properties: &PropertySet) -> DomainResult<()>;

    /// Append `children` below the block (or page) `parent`.
    async fn append_block_children(&self, parent: &PageId, children: &[Block])
        -> DomainResult<()>;
}

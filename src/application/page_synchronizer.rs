//! Create-or-update handling for a single issue event.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Block, IssueEvent, PageId, Repository, SkipReason, SyncOutcome, MAX_BLOCKS_PER_APPEND,
    MAX_BLOCKS_PER_REQUEST,
};
use crate::domain::ports::{ContentConverter, ConversionContext, PageStore};
use crate::services::{locate_page, map_properties, resolve_status_options};

/// Mirrors issue events into pages of one database.
///
/// Every store call is awaited before the next one is issued. Failures
/// propagate as-is; a page created before a failed append stays behind
/// without content.
pub struct PageSynchronizer {
    store: Arc<dyn PageStore>,
    converter: Arc<dyn ContentConverter>,
    database_id: String,
}

impl PageSynchronizer {
    /// Create a synchronizer writing into `database_id` through `store`.
    pub fn new(
        store: Arc<dyn PageStore>,
        converter: Arc<dyn ContentConverter>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            converter,
            database_id: database_id.into(),
        }
    }

    /// The database pages are written into.
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Create the page for a newly opened issue and append its body.
    #[instrument(skip_all, fields(issue = event.issue.number, issue_id = event.issue.id))]
    pub async fn sync_opened(&self, event: &IssueEvent) -> DomainResult<SyncOutcome> {
        info!("Creating page for issue #{}", event.issue.number);

        let status_options =
            resolve_status_options(self.store.as_ref(), &self.database_id).await?;
        let properties = map_properties(event, &status_options, self.converter.as_ref());

        let page_id = self
            .store
            .create_page(&self.database_id, &properties)
            .await?;
        info!(page_id = %page_id, "Created page {page_id}");

        let context = conversion_context(&event.repository);
        let blocks = self
            .converter
            .to_blocks(event.issue.body.as_deref(), &context);
        self.append_blocks(&page_id, &blocks).await?;

        Ok(SyncOutcome::Created {
            page_id,
            blocks_appended: blocks.len(),
        })
    }

    /// Refresh the properties of the page belonging to an existing issue.
    ///
    /// Content blocks are left alone, so body edits do not reach the page
    /// content. An issue without a page is skipped with a warning.
    #[instrument(skip_all, fields(issue = event.issue.number, issue_id = event.issue.id))]
    pub async fn sync_edited(&self, event: &IssueEvent) -> DomainResult<SyncOutcome> {
        let status_options =
            resolve_status_options(self.store.as_ref(), &self.database_id).await?;

        let Some(page_id) =
            locate_page(self.store.as_ref(), &self.database_id, event.issue.id).await?
        else {
            warn!(
                issue_id = event.issue.id,
                "Could not find page with github id {}", event.issue.id
            );
            return Ok(SyncOutcome::Skipped {
                reason: SkipReason::PageNotFound,
            });
        };

        info!("Updating page for issue #{}", event.issue.number);
        let properties = map_properties(event, &status_options, self.converter.as_ref());
        self.store.update_page(&page_id, &properties).await?;

        Ok(SyncOutcome::Updated { page_id })
    }

    /// Append `blocks` under `page_id` in store-sized batches, one request at a time.
    async fn append_blocks(&self, page_id: &PageId, blocks: &[Block]) -> DomainResult<()> {
        if blocks.is_empty() {
            tracing::debug!(page_id = %page_id, "issue body produced no blocks");
            return Ok(());
        }

        for (index, batch) in append_batches(blocks).into_iter().enumerate() {
            tracing::debug!(
                page_id = %page_id,
                batch = index,
                blocks = batch.len(),
                "appending content blocks"
            );
            self.store.append_block_children(page_id, batch).await?;
        }
        Ok(())
    }
}

/// Relative links resolve against the clone URL, falling back to the web URL.
fn conversion_context(repository: &Repository) -> ConversionContext {
    ConversionContext {
        source_url: repository
            .clone_url
            .clone()
            .or_else(|| repository.html_url.clone()),
    }
}

/// Split `blocks` into consecutive runs that each fit one append request:
/// at most 100 top-level blocks and 1000 blocks counting descendants.
fn append_batches(blocks: &[Block]) -> Vec<&[Block]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut total = 0;
    for (index, block) in blocks.iter().enumerate() {
        let count = block.block_count();
        let full = index - start == MAX_BLOCKS_PER_APPEND || total + count > MAX_BLOCKS_PER_REQUEST;
        if index > start && full {
            batches.push(&blocks[start..index]);
            start = index;
            total = 0;
        }
        total += count;
    }
    if start < blocks.len() {
        batches.push(&blocks[start..]);
    }
    batches
}

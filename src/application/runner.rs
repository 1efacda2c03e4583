//! One synchronization run: payload file in, outcome out.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::markdown::MarkdownConverter;
use crate::adapters::notion::NotionClient;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, IssueEvent, SyncOutcome};

use super::dispatcher::dispatch;
use super::page_synchronizer::PageSynchronizer;

/// Decode an `issues` webhook payload.
pub fn parse_event(payload: &str) -> DomainResult<IssueEvent> {
    serde_json::from_str(payload).map_err(|e| {
        DomainError::ValidationFailed(format!("payload is not an issues event: {e}"))
    })
}

/// Read and decode the payload at `path`.
pub fn read_event(path: &Path) -> Result<IssueEvent> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event payload {}", path.display()))?;
    let event = parse_event(&payload)
        .with_context(|| format!("Failed to decode event payload {}", path.display()))?;
    debug!(
        action = %event.action,
        issue = event.issue.number,
        repository = %event.repository.name,
        "Event payload loaded"
    );
    Ok(event)
}

/// Wire the Notion client and Markdown converter together and handle the
/// event named by `config.github.event_path`.
pub async fn run(config: &Config) -> Result<SyncOutcome> {
    let event_path = config
        .github
        .event_path
        .as_deref()
        .context("No event payload path configured")?;
    let event = read_event(event_path)?;

    let store = Arc::new(NotionClient::new(&config.notion));
    let converter = Arc::new(MarkdownConverter::new());
    let synchronizer = PageSynchronizer::new(store, converter, config.notion.database_id.as_str());

    let outcome = dispatch(&synchronizer, &event).await.with_context(|| {
        format!(
            "Failed to sync issue #{} ({})",
            event.issue.number, event.action
        )
    })?;

    match outcome.page_id() {
        Some(page_id) => info!(page_id = %page_id, outcome = ?outcome, "Issue page synchronized"),
        None => info!(outcome = ?outcome, "Nothing to update"),
    }
    Ok(outcome)
}

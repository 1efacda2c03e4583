//! Routes an issue event to the create or refresh path.

use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueAction, IssueEvent, SyncOutcome};

use super::page_synchronizer::PageSynchronizer;

/// The two behaviours a delivery can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Create a page and append the issue body.
    CreatePage,
    /// Re-map the issue and overwrite the existing page's properties.
    RefreshProperties,
}

impl SyncMode {
    /// Choose the sync mode for `action`.
    ///
    /// Only `opened` creates a page. Every other action, known or not, runs
    /// the same full property refresh; there is no per-action handling.
    #[allow(clippy::match_same_arms)]
    pub const fn for_action(action: &IssueAction) -> Self {
        match action {
            IssueAction::Opened => Self::CreatePage,
            IssueAction::Edited
            | IssueAction::Deleted
            | IssueAction::Transferred
            | IssueAction::Pinned
            | IssueAction::Unpinned
            | IssueAction::Closed
            | IssueAction::Reopened
            | IssueAction::Assigned
            | IssueAction::Unassigned
            | IssueAction::Labeled
            | IssueAction::Unlabeled
            | IssueAction::Locked
            | IssueAction::Unlocked
            | IssueAction::Milestoned
            | IssueAction::Demilestoned => Self::RefreshProperties,
            IssueAction::Other(_) => Self::RefreshProperties,
        }
    }
}

/// Handle one delivery end to end.
pub async fn dispatch(
    synchronizer: &PageSynchronizer,
    event: &IssueEvent,
) -> DomainResult<SyncOutcome> {
    let mode = SyncMode::for_action(&event.action);
    info!(
        action = %event.action,
        mode = ?mode,
        issue = event.issue.number,
        database_id = synchronizer.database_id(),
        "Starting issue sync"
    );

    let outcome = match mode {
        SyncMode::CreatePage => synchronizer.sync_opened(event).await?,
        SyncMode::RefreshProperties => synchronizer.sync_edited(event).await?,
    };

    info!(outcome = ?outcome, "Complete");
    Ok(outcome)
}

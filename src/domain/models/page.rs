//! Page identity and the result of a synchronization run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned page identifier.
///
/// Never persisted on the GitHub side; re-derived by query on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Why a run finished without writing to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// An edit arrived for an issue that has no page (e.g., it predates the install).
    PageNotFound,
}

/// What a synchronization run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SyncOutcome {
    /// A page was created and the converted body appended to it.
    Created { page_id: PageId, blocks_appended: usize },
    /// An existing page's properties were refreshed.
    Updated { page_id: PageId },
    /// Nothing was written.
    Skipped { reason: SkipReason },
}

impl SyncOutcome {
    /// The page touched by this run, if any.
    pub const fn page_id(&self) -> Option<&PageId> {
        match self {
            Self::Created { page_id, .. } | Self::Updated { page_id } => Some(page_id),
            Self::Skipped { .. } => None,
        }
    }
}

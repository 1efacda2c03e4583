//! GitHub `issues` webhook payload models.
//!
//! Only the fields the synchronizer reads are modelled; everything else in
//! the delivery is ignored during deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `action` field of an `issues` webhook delivery.
///
/// Every documented action has its own variant so call sites can match on
/// them exhaustively. Undocumented values land in [`IssueAction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueAction {
    Opened,
    Edited,
    Deleted,
    Transferred,
    Pinned,
    Unpinned,
    Closed,
    Reopened,
    Assigned,
    Unassigned,
    Labeled,
    Unlabeled,
    Locked,
    Unlocked,
    Milestoned,
    Demilestoned,
    /// An action GitHub sent that this crate does not know about.
    Other(String),
}

impl IssueAction {
    /// Returns the wire representation of this action.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Deleted => "deleted",
            Self::Transferred => "transferred",
            Self::Pinned => "pinned",
            Self::Unpinned => "unpinned",
            Self::Closed => "closed",
            Self::Reopened => "reopened",
            Self::Assigned => "assigned",
            Self::Unassigned => "unassigned",
            Self::Labeled => "labeled",
            Self::Unlabeled => "unlabeled",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Milestoned => "milestoned",
            Self::Demilestoned => "demilestoned",
            Self::Other(action) => action,
        }
    }
}

impl From<String> for IssueAction {
    fn from(action: String) -> Self {
        match action.as_str() {
            "opened" => Self::Opened,
            "edited" => Self::Edited,
            "deleted" => Self::Deleted,
            "transferred" => Self::Transferred,
            "pinned" => Self::Pinned,
            "unpinned" => Self::Unpinned,
            "closed" => Self::Closed,
            "reopened" => Self::Reopened,
            "assigned" => Self::Assigned,
            "unassigned" => Self::Unassigned,
            "labeled" => Self::Labeled,
            "unlabeled" => Self::Unlabeled,
            "locked" => Self::Locked,
            "unlocked" => Self::Unlocked,
            "milestoned" => Self::Milestoned,
            "demilestoned" => Self::Demilestoned,
            _ => Self::Other(action),
        }
    }
}

impl From<IssueAction> for String {
    fn from(action: IssueAction) -> Self {
        match action {
            IssueAction::Other(action) => action,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `issues` webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    /// What happened to the issue.
    pub action: IssueAction,
    /// The issue's full state after the action.
    pub issue: Issue,
    /// The repository the issue lives in.
    pub repository: Repository,
    /// Present when the repository belongs to an organization.
    #[serde(default)]
    pub organization: Option<Organization>,
}

/// Issue snapshot carried by the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Globally unique, immutable numeric identifier.
    pub id: u64,
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// Current state, normally "open" or "closed".
    #[serde(default)]
    pub state: Option<String>,
    /// ISO 8601 timestamp of creation.
    pub created_at: String,
    /// ISO 8601 timestamp of the last update.
    pub updated_at: String,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    /// Labels applied to the issue (GitHub may send null).
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
    /// The issue author.
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Repository the event was delivered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Short repository name, without the owner.
    pub name: String,
    /// HTTPS clone URL (e.g., `https://github.com/org/repo.git`).
    #[serde(default)]
    pub clone_url: Option<String>,
    /// URL to view the repository in the GitHub UI.
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub login: String,
}

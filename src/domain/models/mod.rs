pub mod block;
pub mod config;
pub mod database;
pub mod event;
pub mod page;
pub mod property;

pub use block::{Block, MAX_BLOCKS_PER_APPEND, MAX_BLOCKS_PER_REQUEST};
pub use config::{Config, GitHubConfig, LogFormat, LoggingConfig, NotionConfig};
pub use database::{
    DatabaseSchema, NumberEqualsQuery, PropertySchema, StatusOption, ID_PROPERTY,
    STATUS_PROPERTY,
};
pub use event::{Issue, IssueAction, IssueEvent, Label, Milestone, Organization, Repository, User};
pub use page::{PageId, SkipReason, SyncOutcome};
pub use property::{Annotations, PropertySet, PropertyValue, RichText};

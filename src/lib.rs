//! notion-issue-sync - GitHub issue events mirrored into a Notion database
//!
//! Each run handles one `issues` webhook delivery: an `opened` event creates a
//! page (properties plus the body rendered as blocks), every other action
//! refreshes the properties of the page whose `ID` matches the issue id.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): event, property and page models, port traits
//! - **Service Layer** (`services`): property mapping, status lookup, page lookup
//! - **Application Layer** (`application`): create/update orchestration and dispatch
//! - **Adapters** (`adapters`): Notion HTTP client, Markdown converter
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use notion_issue_sync::{application, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None, None)?;
//!     let outcome = application::run(&config).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::markdown::MarkdownConverter;
pub use adapters::notion::NotionClient;
pub use application::{dispatch, run, PageSynchronizer, SyncMode};
pub use domain::models::{Config, IssueAction, IssueEvent, PageId, PropertySet, SyncOutcome};
pub use domain::ports::{ContentConverter, ConversionContext, PageStore};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};

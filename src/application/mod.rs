//! Application layer: use-case orchestration for one webhook delivery.

pub mod dispatcher;
pub mod page_synchronizer;
pub mod runner;

pub use dispatcher::{dispatch, SyncMode};
pub use page_synchronizer::PageSynchronizer;
pub use runner::{parse_event, read_event, run};

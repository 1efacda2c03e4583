//! Shared fixtures for service and application unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Block, DatabaseSchema, Issue, IssueAction, IssueEvent, NumberEqualsQuery, PageId,
    PropertySchema, PropertySet, PropertyValue, Repository, RichText, StatusOption, User,
    STATUS_PROPERTY,
};
use crate::domain::ports::{ContentConverter, ConversionContext, PageStore};
use tracing_subscriber::fmt::MakeWriter;

/// The `opened` delivery used throughout the tests: issue 42, #7, "Bug".
pub fn sample_event() -> IssueEvent {
    IssueEvent {
        action: IssueAction::Opened,
        issue: Issue {
            id: 42,
            number: 7,
            title: "Bug".to_string(),
            body: Some("- a\n- b".to_string()),
            state: Some("open".to_string()),
            created_at: "2024-01-14T08:00:00Z".to_string(),
            updated_at: "2024-01-15T10:30:00+02:00".to_string(),
            assignees: vec![],
            milestone: None,
            labels: None,
            user: User {
                login: "monalisa".to_string(),
            },
        },
        repository: Repository {
            name: "repo".to_string(),
            clone_url: Some("https://github.com/org/repo.git".to_string()),
            html_url: Some("https://github.com/org/repo".to_string()),
        },
        organization: None,
    }
}

pub fn sample_status_options() -> Vec<StatusOption> {
    vec![
        StatusOption {
            id: "status-open".to_string(),
            name: "Open".to_string(),
            color: "green".to_string(),
        },
        StatusOption {
            id: "status-closed".to_string(),
            name: "Closed".to_string(),
            color: "red".to_string(),
        },
    ]
}

/// Converter that copies the body verbatim: one paragraph per line.
pub struct EchoConverter;

impl ContentConverter for EchoConverter {
    fn to_blocks(&self, body: Option<&str>, _context: &ConversionContext) -> Vec<Block> {
        body.unwrap_or_default()
            .lines()
            .map(|line| Block::paragraph(vec![RichText::plain(line)]))
            .collect()
    }

    fn to_property_value(&self, body: Option<&str>) -> PropertyValue {
        PropertyValue::text(body.unwrap_or_default())
    }
}

/// A store call as observed by [`FakeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    RetrieveDatabase(String),
    Query { database_id: String, issue_id: u64 },
    Create { database_id: String },
    Update { page_id: String },
    Append { parent: String, blocks: usize },
}

/// In-memory store that records every call in order.
pub struct FakeStore {
    pub schema: DatabaseSchema,
    pub query_results: Vec<PageId>,
    pub created_id: PageId,
    pub fail_on_append: bool,
    pub calls: Mutex<Vec<StoreCall>>,
    pub last_properties: Mutex<VecDeque<PropertySet>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            schema: DatabaseSchema::new("db").with_property(
                STATUS_PROPERTY,
                PropertySchema::Select {
                    options: sample_status_options(),
                },
            ),
            query_results: vec![],
            created_id: PageId::from("created_page"),
            fail_on_append: false,
            calls: Mutex::new(vec![]),
            last_properties: Mutex::new(VecDeque::new()),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PageStore for FakeStore {
    async fn retrieve_database(&self, database_id: &str) -> DomainResult<DatabaseSchema> {
        self.record(StoreCall::RetrieveDatabase(database_id.to_string()));
        Ok(self.schema.clone())
    }

    async fn query_database(
        &self,
        database_id: &str,
        query: &NumberEqualsQuery,
    ) -> DomainResult<Vec<PageId>> {
        self.record(StoreCall::Query {
            database_id: database_id.to_string(),
            issue_id: query.equals,
        });
        Ok(self
            .query_results
            .iter()
            .take(usize::from(query.page_size))
            .cloned()
            .collect())
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: &PropertySet,
    ) -> DomainResult<PageId> {
        self.record(StoreCall::Create {
            database_id: database_id.to_string(),
        });
        self.last_properties
            .lock()
            .unwrap()
            .push_back(properties.clone());
        Ok(self.created_id.clone())
    }

    async fn update_page(&self, page_id: &PageId, properties: &PropertySet) -> DomainResult<()> {
        self.record(StoreCall::Update {
            page_id: page_id.to_string(),
        });
        self.last_properties
            .lock()
            .unwrap()
            .push_back(properties.clone());
        Ok(())
    }

    async fn append_block_children(
        &self,
        parent: &PageId,
        children: &[Block],
    ) -> DomainResult<()> {
        self.record(StoreCall::Append {
            parent: parent.to_string(),
            blocks: children.len(),
        });
        if self.fail_on_append {
            return Err(DomainError::Transport("append rejected".to_string()));
        }
        Ok(())
    }
}

/// In-memory log sink; install with `tracing::subscriber::set_default`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

//! Database schema models: the parts of a store database the synchronizer reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the select property whose options drive status reconciliation.
pub const STATUS_PROPERTY: &str = "Status";

/// Name of the number property holding the GitHub issue id.
pub const ID_PROPERTY: &str = "ID";

/// One entry of a select property's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    /// Store-assigned option identifier.
    pub id: String,
    /// Display name, matched case-insensitively against the issue state.
    pub name: String,
    /// Display colour (e.g., "green").
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".to_string()
}

/// The schema of a single database property, reduced to what matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySchema {
    /// A select property and its configured options.
    Select { options: Vec<StatusOption> },
    /// Any other property type, identified by its wire type name.
    Other { kind: String },
}

impl PropertySchema {
    /// The store's type name for this property.
    pub fn kind(&self) -> &str {
        match self {
            Self::Select { .. } => "select",
            Self::Other { kind } => kind,
        }
    }
}

/// A database's property schema keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSchema {
    pub id: String,
    pub properties: HashMap<String, PropertySchema>,
}

impl DatabaseSchema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style helper used when assembling schemas by hand.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}

/// A query for pages whose number property equals a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberEqualsQuery {
    pub property: String,
    pub equals: u64,
    /// Upper bound on returned results.
    pub page_size: u8,
}

impl NumberEqualsQuery {
    /// Query for the page joined to GitHub issue `issue_id`, at most one result.
    pub fn issue_id(issue_id: u64) -> Self {
        Self {
            property: ID_PROPERTY.to_string(),
            equals: issue_id,
            page_size: 1,
        }
    }
}

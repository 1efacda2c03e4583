//! Notion API response and request models.
//!
//! These structs map to the Notion REST API JSON payloads. They are used
//! internally by the Notion adapter and are not part of the public domain
//! model; responses are converted into domain types before leaving the
//! adapter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::models::{
    Block, DatabaseSchema, NumberEqualsQuery, PropertySchema, PropertySet, StatusOption,
};

/// A database object returned by `GET /v1/databases/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionDatabase {
    pub id: String,
    /// Property schema keyed by property name.
    #[serde(default)]
    pub properties: HashMap<String, NotionPropertySchema>,
}

/// One property of a database schema.
///
/// Only `select` configuration is decoded; other types keep their type name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionPropertySchema {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<NotionSelectConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionSelectConfig {
    #[serde(default)]
    pub options: Vec<StatusOption>,
}

impl From<NotionDatabase> for DatabaseSchema {
    fn from(database: NotionDatabase) -> Self {
        let properties = database
            .properties
            .into_iter()
            .map(|(name, property)| {
                let schema = match (property.kind.as_str(), property.select) {
                    ("select", Some(select)) => PropertySchema::Select {
                        options: select.options,
                    },
                    _ => PropertySchema::Other {
                        kind: property.kind,
                    },
                };
                (name, schema)
            })
            .collect();

        Self {
            id: database.id,
            properties,
        }
    }
}

/// Request body for `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionQueryRequest<'a> {
    pub filter: NotionNumberFilter<'a>,
    pub page_size: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotionNumberFilter<'a> {
    pub property: &'a str,
    pub number: NotionNumberCondition,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NotionNumberCondition {
    pub equals: u64,
}

impl<'a> From<&'a NumberEqualsQuery> for NotionQueryRequest<'a> {
    fn from(query: &'a NumberEqualsQuery) -> Self {
        Self {
            filter: NotionNumberFilter {
                property: &query.property,
                number: NotionNumberCondition {
                    equals: query.equals,
                },
            },
            page_size: query.page_size,
        }
    }
}

/// Response from the database query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionQueryResponse {
    pub results: Vec<NotionPageRef>,
}

/// The slice of a page object the adapter needs: its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionPageRef {
    pub id: String,
}

/// Request body for `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionCreatePageRequest<'a> {
    pub parent: NotionDatabaseParent<'a>,
    pub properties: &'a PropertySet,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotionDatabaseParent<'a> {
    pub database_id: &'a str,
}

/// Request body for `PATCH /v1/pages/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionUpdatePageRequest<'a> {
    pub properties: &'a PropertySet,
}

/// Request body for `PATCH /v1/blocks/{id}/children`.
#[derive(Debug, Clone, Serialize)]
pub struct NotionAppendChildrenRequest<'a> {
    pub children: &'a [Block],
}

/// Error object returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionErrorResponse {
    #[serde(default)]
    pub status: u16,
    /// Machine-readable code (e.g., "validation_error", "object_not_found").
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_database_with_select_status() {
        let json = r#"{
            "object": "database",
            "id": "db-1",
            "title": [],
            "properties": {
                "Status": {
                    "id": "abc",
                    "name": "Status",
                    "type": "select",
                    "select": {
                        "options": [
                            { "id": "o1", "name": "Open", "color": "green" },
                            { "id": "o2", "name": "Closed", "color": "red" }
                        ]
                    }
                },
                "ID": { "id": "def", "name": "ID", "type": "number", "number": { "format": "number" } }
            }
        }"#;
        let database: NotionDatabase = serde_json::from_str(json).unwrap();
        let schema = DatabaseSchema::from(database);

        assert_eq!(schema.id, "db-1");
        match schema.properties.get("Status") {
            Some(PropertySchema::Select { options }) => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].name, "Open");
                assert_eq!(options[1].color, "red");
            }
            other => panic!("expected select schema, got {other:?}"),
        }
        assert_eq!(schema.properties["ID"].kind(), "number");
    }

    #[test]
    fn test_status_typed_property_is_not_select() {
        let json = r#"{
            "id": "db-2",
            "properties": {
                "Status": { "id": "s", "type": "status", "status": { "options": [] } }
            }
        }"#;
        let schema = DatabaseSchema::from(serde_json::from_str::<NotionDatabase>(json).unwrap());
        assert_eq!(
            schema.properties["Status"],
            PropertySchema::Other {
                kind: "status".to_string()
            }
        );
    }

    #[test]
    fn test_query_request_serialization() {
        let query = NumberEqualsQuery::issue_id(42);
        let body = serde_json::to_value(NotionQueryRequest::from(&query)).unwrap();
        assert_eq!(
            body,
            json!({
                "filter": { "property": "ID", "number": { "equals": 42 } },
                "page_size": 1
            })
        );
    }

    #[test]
    fn test_query_response_deserialization() {
        let json = r#"{
            "object": "list",
            "results": [{ "object": "page", "id": "page_1", "properties": {} }],
            "next_cursor": null,
            "has_more": false
        }"#;
        let resp: NotionQueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].id, "page_1");
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{
            "object": "error",
            "status": 400,
            "code": "validation_error",
            "message": "Status is expected to be select."
        }"#;
        let err: NotionErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.status, 400);
        assert_eq!(err.code, "validation_error");
    }
}

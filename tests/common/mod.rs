//! Common test utilities for integration tests
//!
//! Fixtures for Notion responses and issue webhook payloads shared by the
//! client and end-to-end run tests.

#![allow(dead_code)]

use std::path::PathBuf;

use notion_issue_sync::domain::models::{Config, NotionConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

pub const TOKEN: &str = "secret_test_token";
pub const DATABASE_ID: &str = "db";
pub const ISSUE_ID: u64 = 42;

/// Notion settings pointing at `server`, with a rate limit high enough to
/// never sleep in tests.
pub fn notion_config(server: &MockServer) -> NotionConfig {
    NotionConfig {
        token: TOKEN.to_string(),
        database_id: DATABASE_ID.to_string(),
        base_url: server.uri(),
        requests_per_second: 100,
        ..NotionConfig::default()
    }
}

/// A database whose `Status` select has Open and Closed options.
pub fn database_json() -> Value {
    json!({
        "object": "database",
        "id": DATABASE_ID,
        "properties": {
            "Name": { "id": "title", "name": "Name", "type": "title", "title": {} },
            "ID": { "id": "a%3Ab", "name": "ID", "type": "number", "number": { "format": "number" } },
            "Status": {
                "id": "s%3Ac",
                "name": "Status",
                "type": "select",
                "select": {
                    "options": [
                        { "id": "status-open", "name": "Open", "color": "green" },
                        { "id": "status-closed", "name": "Closed", "color": "red" }
                    ]
                }
            }
        }
    })
}

/// A database where `Status` exists but is a plain text column.
pub fn misconfigured_database_json() -> Value {
    json!({
        "object": "database",
        "id": DATABASE_ID,
        "properties": {
            "Status": { "id": "s", "name": "Status", "type": "rich_text", "rich_text": {} }
        }
    })
}

pub fn page_json(id: &str) -> Value {
    json!({ "object": "page", "id": id, "properties": {} })
}

pub fn query_json(ids: &[&str]) -> Value {
    let results: Vec<Value> = ids.iter().map(|id| page_json(id)).collect();
    json!({ "object": "list", "results": results, "has_more": false, "next_cursor": null })
}

/// An `issues` webhook payload for issue #7 (id 42).
pub fn event_json(action: &str, body: Option<&str>) -> Value {
    json!({
        "action": action,
        "issue": {
            "id": ISSUE_ID,
            "number": 7,
            "title": "Bug",
            "body": body,
            "state": "open",
            "created_at": "2024-01-14T08:00:00Z",
            "updated_at": "2024-01-15T10:30:00+02:00",
            "assignees": [{ "login": "octocat" }, { "login": "hubot" }],
            "milestone": { "title": "v1" },
            "labels": [{ "name": "bug" }],
            "user": { "login": "monalisa" }
        },
        "repository": {
            "name": "repo",
            "clone_url": "https://github.com/org/repo.git",
            "html_url": "https://github.com/org/repo"
        },
        "organization": { "login": "org" }
    })
}

/// Write `payload` to a temp file and build a run config around it.
///
/// The returned `TempDir` must outlive the run.
pub fn run_config(server: &MockServer, payload: &Value) -> (TempDir, Config) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path: PathBuf = dir.path().join("event.json");
    std::fs::write(&path, payload.to_string()).expect("Failed to write event payload");

    let mut config = Config::default();
    config.notion = notion_config(server);
    config.github.event_path = Some(path);
    (dir, config)
}

mod common;

use notion_issue_sync::application::run;
use notion_issue_sync::domain::models::{PageId, SkipReason, SyncOutcome};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use common::{database_json, event_json, misconfigured_database_json, page_json, query_json, run_config};

async fn mount_database(server: &MockServer, database: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/databases/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(database))
        .mount(server)
        .await;
}

fn request_paths(requests: &[Request]) -> Vec<String> {
    requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

#[tokio::test]
async fn test_opened_creates_page_then_appends_body() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, database_json()).await;

    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(body_partial_json(json!({
            "parent": { "database_id": "db" },
            "properties": {
                "ID": { "number": 42 },
                "Assignees": { "rich_text": [{ "text": { "content": "octocat, hubot" } }] },
                "Status": { "select": { "name": "Open" } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("new_page")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/blocks/new_page/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("opened", Some("- a\n- b")));
    let outcome = run(&config).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Created {
            page_id: PageId::from("new_page"),
            blocks_appended: 2,
        }
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        request_paths(&requests),
        [
            "GET /v1/databases/db",
            "POST /v1/pages",
            "PATCH /v1/blocks/new_page/children",
        ]
    );

    let append: Value = requests[2].body_json().unwrap();
    let children = append["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c["type"] == "bulleted_list_item"));
}

#[tokio::test]
async fn test_opened_without_body_skips_append() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, database_json()).await;

    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("new_page")))
        .mount(&mock_server)
        .await;

    Mock::given(path_regex("^/v1/blocks/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("opened", None));
    let outcome = run(&config).await.unwrap();

    assert!(matches!(
        outcome,
        SyncOutcome::Created { blocks_appended: 0, .. }
    ));
}

#[tokio::test]
async fn test_edited_without_page_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, database_json()).await;

    Mock::given(method("POST"))
        .and(path("/v1/databases/db/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_json(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("edited", Some("body")));
    let outcome = run(&config).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Skipped {
            reason: SkipReason::PageNotFound
        }
    );
}

#[tokio::test]
async fn test_closed_updates_matching_page() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, database_json()).await;

    Mock::given(method("POST"))
        .and(path("/v1/databases/db/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_json(&["page_1"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/pages/page_1"))
        .and(body_partial_json(json!({
            "properties": { "Status": { "select": { "id": "status-closed" } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("page_1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut payload = event_json("closed", Some("- a"));
    payload["issue"]["state"] = json!("closed");
    let (_dir, config) = run_config(&mock_server, &payload);
    let outcome = run(&config).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Updated {
            page_id: PageId::from("page_1")
        }
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert!(
        requests.iter().all(|r| !r.url.path().starts_with("/v1/blocks")),
        "Edits never touch page content"
    );
}

#[tokio::test]
async fn test_unknown_action_refreshes_properties() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, database_json()).await;

    Mock::given(method("POST"))
        .and(path("/v1/databases/db/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_json(&["page_1"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/pages/page_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("page_1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("typed", None));
    let outcome = run(&config).await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Updated { .. }));
}

#[tokio::test]
async fn test_status_must_be_a_select_property() {
    let mock_server = MockServer::start().await;
    mount_database(&mock_server, misconfigured_database_json()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("opened", Some("x")));
    let err = run(&config).await.unwrap_err();

    assert!(format!("{err:#}").contains("must be a select property"));
}

#[tokio::test]
async fn test_store_failure_fails_the_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/databases/db"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&mock_server)
        .await;

    let (_dir, config) = run_config(&mock_server, &event_json("edited", None));
    let err = run(&config).await.unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("Failed to sync issue #7"));
    assert!(message.contains("unauthorized"));
}

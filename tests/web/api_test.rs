//! Router tests for the gallery API.
//!
//! The router runs against an in-memory `NotionApi` stub so each failure tier
//! can be driven directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use notion_gallery::notion::{
    DatabaseSchema, NotionApi, NotionError, NotionResult, PropertyDefinition, QueryResponse,
};
use notion_gallery::web::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const DATABASE_ID: &str = "d9824bdc84454327be8b5b47500af6ce";

/// What the stub answers with.
#[derive(Clone, Copy)]
enum Reply {
    Ok,
    Unauthorized,
    Malformed,
}

struct StubNotion {
    records: Vec<Value>,
    has_more: bool,
    schema: DatabaseSchema,
    reply: Reply,
    calls: AtomicUsize,
}

impl StubNotion {
    fn new(reply: Reply) -> Self {
        Self {
            records: Vec::new(),
            has_more: false,
            schema: DatabaseSchema::default(),
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_records(mut self, records: Vec<Value>) -> Self {
        self.records = records;
        self
    }

    fn with_schema(mut self, schema: DatabaseSchema) -> Self {
        self.schema = schema;
        self
    }

    fn failure(&self) -> Option<NotionError> {
        match self.reply {
            Reply::Ok => None,
            Reply::Unauthorized => Some(NotionError::api(
                401,
                "unauthorized",
                "API token is invalid.",
            )),
            Reply::Malformed => Some(NotionError::Decode(
                serde_json::from_str::<DatabaseSchema>("{\"properties\": 5}").unwrap_err(),
            )),
        }
    }
}

#[async_trait]
impl NotionApi for StubNotion {
    async fn query_database(&self, database_id: &str) -> NotionResult<QueryResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(database_id, DATABASE_ID);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(QueryResponse {
            results: self.records.clone(),
            has_more: self.has_more,
            next_cursor: self.has_more.then(|| "cursor".to_string()),
        })
    }

    async fn retrieve_database(&self, database_id: &str) -> NotionResult<DatabaseSchema> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(database_id, DATABASE_ID);
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(self.schema.clone()),
        }
    }
}

fn app(database_id: Option<&str>, stub: Arc<StubNotion>) -> Router {
    router(Arc::new(AppState::new(database_id.map(str::to_string), stub)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "{uri} returned {content_type}"
    );

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

fn sample_records(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "object": "page",
                "id": format!("page-{i}"),
                "properties": {
                    "Name": { "type": "title", "title": [{ "plain_text": format!("Post {i}") }] }
                }
            })
        })
        .collect()
}

fn sample_schema() -> DatabaseSchema {
    DatabaseSchema::from_properties([
        ("Platform", PropertyDefinition::select(["PC", "Console"])),
        ("Category", PropertyDefinition::multi_select(["Console", "Mobile"])),
        ("Status", PropertyDefinition::select(["Posted", "Draft"])),
        ("state", PropertyDefinition::multi_select(["Archived", "Draft"])),
        ("Name", PropertyDefinition::Other),
    ])
}

// ============================================================================
// Unconfigured database id
// ============================================================================

#[tokio::test]
async fn test_missing_database_id_returns_500_everywhere() {
    for uri in ["/api/data", "/api/platforms", "/api/statuses"] {
        let stub = Arc::new(StubNotion::new(Reply::Ok));
        let (status, body) = get(app(None, stub.clone()), uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "error": "Database ID not configured" }), "{uri}");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0, "{uri} must not call Notion");
    }
}

#[tokio::test]
async fn test_blank_database_id_counts_as_missing() {
    let stub = Arc::new(StubNotion::new(Reply::Ok));
    let (status, _) = get(app(Some("  "), stub), "/api/platforms").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// /api/data
// ============================================================================

#[tokio::test]
async fn test_data_returns_first_page_verbatim() {
    let records = sample_records(3);
    let stub = Arc::new(StubNotion::new(Reply::Ok).with_records(records.clone()));

    let (status, body) = get(app(Some(DATABASE_ID), stub.clone()), "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(records));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_data_does_not_follow_pagination() {
    let mut stub = StubNotion::new(Reply::Ok).with_records(sample_records(100));
    stub.has_more = true;
    let stub = Arc::new(stub);

    let (status, body) = get(app(Some(DATABASE_ID), stub.clone()), "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(100));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_data_empty_database() {
    let stub = Arc::new(StubNotion::new(Reply::Ok));
    let (status, body) = get(app(Some(DATABASE_ID), stub), "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_data_surfaces_upstream_failure() {
    let stub = Arc::new(StubNotion::new(Reply::Unauthorized));
    let (status, body) = get(app(Some(DATABASE_ID), stub), "/api/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    insta::assert_json_snapshot!(body, @r#"
    {
      "error": "API token is invalid."
    }
    "#);
}

#[tokio::test]
async fn test_data_surfaces_malformed_response() {
    let stub = Arc::new(StubNotion::new(Reply::Malformed));
    let (status, body) = get(app(Some(DATABASE_ID), stub), "/api/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("unexpected response from Notion"), "{message}");
}

// ============================================================================
// /api/platforms and /api/statuses
// ============================================================================

#[tokio::test]
async fn test_platforms_sorted_and_deduplicated() {
    let stub = Arc::new(StubNotion::new(Reply::Ok).with_schema(sample_schema()));
    let (status, body) = get(app(Some(DATABASE_ID), stub), "/api/platforms").await;

    assert_eq!(status, StatusCode::OK);
    insta::assert_json_snapshot!(body, @r#"
    [
      "Console",
      "Mobile",
      "PC"
    ]
    "#);
}

#[tokio::test]
async fn test_statuses_sorted_and_deduplicated() {
    let stub = Arc::new(StubNotion::new(Reply::Ok).with_schema(sample_schema()));
    let (status, body) = get(app(Some(DATABASE_ID), stub), "/api/statuses").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Archived", "Draft", "Posted"]));
}

#[tokio::test]
async fn test_options_without_matching_properties_are_empty() {
    let schema = DatabaseSchema::from_properties([
        ("Name", PropertyDefinition::Other),
        ("Tags", PropertyDefinition::multi_select(["a", "b"])),
    ]);

    for uri in ["/api/platforms", "/api/statuses"] {
        let stub = Arc::new(StubNotion::new(Reply::Ok).with_schema(schema.clone()));
        let (status, body) = get(app(Some(DATABASE_ID), stub), uri).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_options_swallow_upstream_failures() {
    for reply in [Reply::Unauthorized, Reply::Malformed] {
        for uri in ["/api/platforms", "/api/statuses"] {
            let stub = Arc::new(StubNotion::new(reply));
            let (status, body) = get(app(Some(DATABASE_ID), stub.clone()), uri).await;

            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!([]), "{uri}");
            assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        }
    }
}

// ============================================================================
// Front-end shell
// ============================================================================

#[tokio::test]
async fn test_index_page_served() {
    let stub = Arc::new(StubNotion::new(Reply::Ok));
    let response = app(Some(DATABASE_ID), stub)
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("/static/script.js"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let stub = Arc::new(StubNotion::new(Reply::Ok));
    let response = app(Some(DATABASE_ID), stub)
        .oneshot(
            Request::builder()
                .uri("/static/missing.js")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

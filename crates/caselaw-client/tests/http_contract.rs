//! Exercises `ApiClient` against an in-process HTTP stub to check the request
//! URLs it sends and how it maps response statuses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use caselaw_client::{ApiClient, ApiConfig, ApiError, CaseApi, Operation};
use caselaw_core::{BrowseParams, SearchParams};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    query: Option<String>,
    api_key: Option<String>,
}

impl Captured {
    fn params(&self) -> HashMap<String, String> {
        self.query
            .as_deref()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }
}

struct StubState {
    status: StatusCode,
    body: Value,
    requests: Mutex<Vec<Captured>>,
}

struct Stub {
    base_url: String,
    state: Arc<StubState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl Stub {
    fn requests(&self) -> Vec<Captured> {
        self.state.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> Captured {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn respond(State(state): State<Arc<StubState>>, headers: HeaderMap, uri: Uri) -> Response {
    state.requests.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (state.status, Json(state.body.clone())).into_response()
}

async fn spawn_stub(status: StatusCode, body: Value) -> Stub {
    let state = Arc::new(StubState {
        status,
        body,
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .fallback(respond)
        .with_state(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });
    Stub {
        base_url: format!("http://{addr}/api"),
        state,
        shutdown: Some(tx),
    }
}

fn sample_result() -> Value {
    json!([{
        "case": {
            "id": 1,
            "case_name": "Justice K.S. Puttaswamy v. Union of India",
            "citation": "(2017) 10 SCC 1",
            "year": 2017,
            "bench": null,
            "snippet": "Privacy is intrinsic to life and liberty...",
            "similarity": 0.9
        },
        "similarity": 0.9
    }])
}

#[tokio::test]
async fn search_sends_only_set_params() {
    let stub = spawn_stub(StatusCode::OK, sample_result()).await;
    let client = ApiClient::new(stub.base_url.clone());

    let params = SearchParams {
        q: Some("privacy".into()),
        limit: Some(5),
        ..Default::default()
    };
    let results = client.search(&params).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].case.id, 1);
    assert_eq!(results[0].similarity, Some(0.9));

    let req = stub.only_request();
    assert_eq!(req.path, "/api/search");
    let sent = req.params();
    assert_eq!(sent.get("q").map(String::as_str), Some("privacy"));
    assert_eq!(sent.get("limit").map(String::as_str), Some("5"));
    for absent in ["topic_ids", "year_from", "year_to", "offset"] {
        assert!(!sent.contains_key(absent), "{absent} should be omitted");
    }
}

#[tokio::test]
async fn search_without_filters_sends_no_query() {
    let stub = spawn_stub(StatusCode::OK, json!([])).await;
    let client = ApiClient::new(stub.base_url.clone());

    let results = client.search(&SearchParams::default()).await.unwrap();
    assert!(results.is_empty());

    let req = stub.only_request();
    assert_eq!(req.path, "/api/search");
    assert!(req.params().is_empty());
}

#[tokio::test]
async fn search_failure_message() {
    let stub = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"detail": "boom"})).await;
    let client = ApiClient::new(stub.base_url.clone());

    let params = SearchParams {
        q: Some("test".into()),
        ..Default::default()
    };
    let err = client.search(&params).await.unwrap_err();
    assert_eq!(err.to_string(), "Search failed");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn get_case_fetches_by_id() {
    let detail = json!({
        "id": 42,
        "case_name": "Test v. State",
        "citation": "(2001) 1 SCC 1",
        "year": 2001,
        "bench": null,
        "facts": null,
        "legal_issues": null,
        "judgment": null,
        "ratio_decidendi": null,
        "key_principles": [],
        "source_url": null
    });
    let stub = spawn_stub(StatusCode::OK, detail).await;
    let client = ApiClient::new(stub.base_url.clone());

    let case = client.get_case(42).await.unwrap();
    assert_eq!(case.id, 42);
    assert_eq!(stub.only_request().path, "/api/cases/42");
}

#[tokio::test]
async fn get_case_not_found() {
    let stub = spawn_stub(StatusCode::NOT_FOUND, json!({"detail": "Case not found"})).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.get_case(999).await.unwrap_err();
    assert_eq!(err.to_string(), "Case not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn get_case_server_fault_reads_as_not_found() {
    let stub = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!(null)).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.get_case(999).await.unwrap_err();
    assert_eq!(err.to_string(), "Case not found");
    assert_eq!(err.operation(), Some(Operation::GetCase));
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn similar_cases_explicit_limit() {
    let stub = spawn_stub(StatusCode::OK, json!([])).await;
    let client = ApiClient::new(stub.base_url.clone());

    client.get_similar_cases(1, Some(3)).await.unwrap();
    let req = stub.only_request();
    assert_eq!(req.path, "/api/cases/1/similar");
    assert_eq!(req.query.as_deref(), Some("limit=3"));
}

#[tokio::test]
async fn similar_cases_default_limit_is_five() {
    let stub = spawn_stub(StatusCode::OK, json!([])).await;
    let client = ApiClient::new(stub.base_url.clone());

    client.get_similar_cases(1, None).await.unwrap();
    assert_eq!(stub.only_request().query.as_deref(), Some("limit=5"));
}

#[tokio::test]
async fn similar_cases_failure_message() {
    let stub = spawn_stub(StatusCode::BAD_GATEWAY, json!(null)).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.get_similar_cases(1, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch similar cases");
}

#[tokio::test]
async fn topics_fetched() {
    let topics = json!([{"id": 1, "name": "Law", "slug": "law"}]);
    let stub = spawn_stub(StatusCode::OK, topics).await;
    let client = ApiClient::new(stub.base_url.clone());

    let result = client.get_topics().await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Law");
    assert_eq!(stub.only_request().path, "/api/topics");
}

#[tokio::test]
async fn topics_failure_message() {
    let stub = spawn_stub(StatusCode::SERVICE_UNAVAILABLE, json!(null)).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.get_topics().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch topics");
}

#[tokio::test]
async fn browse_sends_filter_params() {
    let cases = json!([{"id": 1, "case_name": "X", "citation": "Y", "year": 2010}]);
    let stub = spawn_stub(StatusCode::OK, cases).await;
    let client = ApiClient::new(stub.base_url.clone());

    let params = BrowseParams {
        topic_ids: vec![2, 5],
        year_from: Some(2000),
        year_to: Some(2020),
        limit: Some(10),
        ..Default::default()
    };
    let result = client.browse_cases(&params).await.unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].similarity.is_none());

    let req = stub.only_request();
    assert_eq!(req.path, "/api/cases");
    let sent = req.params();
    assert_eq!(sent.get("topic_ids").map(String::as_str), Some("2,5"));
    assert_eq!(sent.get("year_from").map(String::as_str), Some("2000"));
    assert_eq!(sent.get("year_to").map(String::as_str), Some("2020"));
    assert_eq!(sent.get("limit").map(String::as_str), Some("10"));
    assert!(!sent.contains_key("offset"));
}

#[tokio::test]
async fn browse_failure_message() {
    let stub = spawn_stub(StatusCode::UNPROCESSABLE_ENTITY, json!({"detail": []})).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.browse_cases(&BrowseParams::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Browse failed");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let stub = spawn_stub(StatusCode::OK, json!({"not": "a list"})).await;
    let client = ApiClient::new(stub.base_url.clone());

    let err = client.get_topics().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { op: Operation::Topics, .. }));
    assert_eq!(err.to_string(), "Failed to fetch topics");
}

#[tokio::test]
async fn configured_api_key_is_sent() {
    let stub = spawn_stub(StatusCode::OK, json!([])).await;
    let mut config = ApiConfig::new(stub.base_url.clone());
    config.api_key = Some("s3cret".into());
    let client = ApiClient::from_config(&config).unwrap();

    client.get_topics().await.unwrap();
    assert_eq!(stub.only_request().api_key.as_deref(), Some("s3cret"));
}

#[tokio::test]
async fn no_api_key_by_default() {
    let stub = spawn_stub(StatusCode::OK, json!([])).await;
    let client = ApiClient::new(stub.base_url.clone());

    client.get_topics().await.unwrap();
    assert!(stub.only_request().api_key.is_none());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}/api"));
    let err = client.search(&SearchParams::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { op: Operation::Search, .. }));
    assert_eq!(err.to_string(), "Search failed");
    assert!(err.status().is_none());
}

#[tokio::test]
async fn works_through_the_trait() {
    let stub = spawn_stub(StatusCode::OK, sample_result()).await;
    let api: Box<dyn CaseApi> = Box::new(ApiClient::new(stub.base_url.clone()));

    let results = api.get_similar_cases(9, None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(stub.only_request().path, "/api/cases/9/similar");
}

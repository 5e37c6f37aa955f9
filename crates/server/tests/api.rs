//! End-to-end tests of the HTTP surface, driven through `tower::ServiceExt`
//! against file stores in a temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::{get, post};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use courier_server::{AppState, Settings, router};

struct TestApp {
    app: Router,
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.storage.data_dir = Some(dir.path().to_path_buf());
        settings.api.expose_error_details = true;
        settings.executor.default_timeout_ms = 5_000;
        let state = AppState::new(&settings).unwrap();
        Self {
            app: router(state),
            _dir: dir,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.raw(builder.body(body).unwrap()).await
    }

    async fn raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

/// Starts a small upstream server on an ephemeral port.
async fn upstream() -> SocketAddr {
    let app = Router::new()
        .route("/ok", get(|| async { axum::Json(json!({"hello": "world"})) }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, axum::Json(json!({"error": "nope"}))) }),
        )
        .route("/echo", post(|body: String| async move { body }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = TestApp::new();
    let (status, body) = app.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route GET /nowhere not found");
}

#[tokio::test]
async fn test_malformed_json_uses_envelope() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/collections")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.raw(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid JSON body");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_collection_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app
        .post("/collections", json!({"name": "Billing", "description": "Invoices API"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, added) = app
        .post(
            &format!("/collections/{id}/requests"),
            json!({"id": "ignored", "name": "List", "method": "get", "url": "https://api.test/invoices"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = added["data"]["id"].as_str().unwrap().to_string();
    assert_ne!(request_id, "ignored");
    assert_eq!(added["data"]["method"], "GET");

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/collections/{id}/requests/{request_id}"),
            Some(json!({"url": "https://api.test/v2/invoices"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "List");
    assert_eq!(updated["data"]["url"], "https://api.test/v2/invoices");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/collections/unknown/requests/{request_id}"),
            Some(json!({"name": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, exported) = app.get(&format!("/collections/{id}/export")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exported["info"]["name"], "Billing");
    assert_eq!(exported["item"][0]["request"]["url"], "https://api.test/v2/invoices");
    assert!(exported.get("success").is_none());

    let (status, _) = app
        .send(Method::DELETE, &format!("/collections/{id}/requests/{request_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::DELETE, &format!("/collections/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&format!("/collections/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Collection not found");
}

#[tokio::test]
async fn test_create_collection_requires_name() {
    let app = TestApp::new();
    let (status, body) = app.post("/collections", json!({"description": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_import_rejects_unknown_shape() {
    let app = TestApp::new();
    let (status, body) = app.post("/collections/import", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unsupported collection format");

    let (_, listed) = app.get("/collections").await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_import_postman_and_export_round_trip() {
    let app = TestApp::new();
    let (status, report) = app
        .post(
            "/collections/import",
            json!({
                "info": {"name": "X"},
                "item": [
                    {"name": "R", "request": {"method": "GET", "url": "http://e.x", "header": []}},
                    {"name": "Folder", "item": []}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["data"]["format"], "postman");
    assert_eq!(report["data"]["warnings"][0]["severity"], "info");
    let id = report["data"]["collection"]["id"].as_str().unwrap().to_string();

    let (_, exported) = app.get(&format!("/collections/{id}/export")).await;
    let item = &exported["item"][0];
    assert_eq!(item["name"], "R");
    assert_eq!(item["request"]["method"], "GET");
    assert_eq!(item["request"]["url"], "http://e.x");
}

#[tokio::test]
async fn test_environment_activation() {
    let app = TestApp::new();

    let (status, _) = app.get("/environments/active").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, dev) = app
        .post("/environments", json!({"name": "Dev", "variables": {"host": "dev.local"}}))
        .await;
    assert_eq!(dev["data"]["isActive"], true);
    let (_, prod) = app.post("/environments", json!({"name": "Prod"})).await;
    assert_eq!(prod["data"]["isActive"], false);
    let dev_id = dev["data"]["id"].as_str().unwrap().to_string();
    let prod_id = prod["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app.post("/environments/missing/activate", json!(null)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post(&format!("/environments/{prod_id}/activate"), json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, active) = app.get("/environments/active").await;
    assert_eq!(active["data"]["id"], prod_id.as_str());

    let (_, listed) = app.get("/environments").await;
    let flags: Vec<_> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["isActive"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![false, true]);

    let (status, _) = app.send(Method::DELETE, &format!("/environments/{prod_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, active) = app.get("/environments/active").await;
    assert_eq!(active["data"]["id"], dev_id.as_str());

    let (status, renamed) = app
        .send(Method::PUT, &format!("/environments/{dev_id}"), Some(json!({"name": "Local"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["data"]["name"], "Local");
    assert_eq!(renamed["data"]["variables"]["host"], "dev.local");
}

#[tokio::test]
async fn test_execute_validation_skips_history() {
    let app = TestApp::new();

    let (status, body) = app.post("/execute", json!({"method": "GET"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .post("/execute", json!({"method": "BREW", "url": "https://example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, history) = app.get("/history").await;
    assert_eq!(history["data"]["total"], 0);
}

#[tokio::test]
async fn test_execute_records_success_only() {
    let app = TestApp::new();
    let addr = upstream().await;

    let (status, body) = app
        .post("/execute", json!({"method": "get", "url": format!("http://{addr}/ok")}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], 200);
    assert_eq!(body["data"]["data"], json!({"hello": "world"}));
    assert!(body["data"]["responseTime"].is_u64());

    let (status, body) = app
        .post("/execute", json!({"method": "GET", "url": format!("http://{addr}/missing")}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Request failed with status code 404");
    assert_eq!(body["data"], json!({"error": "nope"}));

    let (_, history) = app.get("/history").await;
    assert_eq!(history["data"]["total"], 1);
    assert_eq!(history["data"]["items"][0]["response"]["status"], 200);
}

#[tokio::test]
async fn test_execute_resolves_active_environment() {
    let app = TestApp::new();
    let addr = upstream().await;
    app.post(
        "/environments",
        json!({"name": "Local", "variables": {"base": format!("http://{addr}"), "who": "courier"}}),
    )
    .await;

    let (status, body) = app
        .post(
            "/execute",
            json!({
                "method": "POST",
                "url": "{{base}}/echo",
                "body": "hello {{who}}",
                "resolveVariables": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"], "hello courier");
}

#[tokio::test]
async fn test_history_pagination_and_clear() {
    let app = TestApp::new();
    let addr = upstream().await;
    for _ in 0..3 {
        app.post("/execute", json!({"method": "GET", "url": format!("http://{addr}/ok")}))
            .await;
    }

    let (_, page) = app.get("/history?limit=2&offset=1").await;
    assert_eq!(page["data"]["total"], 3);
    assert_eq!(page["data"]["items"].as_array().unwrap().len(), 2);

    let (status, _) = app.get("/history?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cleared) = app.send(Method::DELETE, "/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["message"], "History cleared");
    let (_, page) = app.get("/history").await;
    assert_eq!(page["data"]["total"], 0);
}

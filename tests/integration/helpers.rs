//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use localgit_api::{AppState, build_app};
use localgit_core::config::AppConfig;
use localgit_database::Stores;

/// Test application context
#[derive(Clone)]
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application backed by a fresh memory store
    pub fn new() -> Self {
        let state = AppState::new(AppConfig::default(), Stores::memory());
        Self {
            router: build_app(state),
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Create a folder and return its ID
    pub async fn create_folder(&self, name: &str) -> String {
        let response = self
            .request("POST", "/api/folders", Some(serde_json::json!({ "name": name })))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Create a file and return its ID
    pub async fn create_file(&self, folder_id: &str, name: &str, content: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/files",
                Some(serde_json::json!({
                    "folder_id": folder_id,
                    "name": name,
                    "content": content,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Replace a file's content
    pub async fn update_file(&self, file_id: &str, content: &str) -> TestResponse {
        self.request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "content": content })),
        )
        .await
    }

    /// Version numbers of a file, as listed by the API
    pub async fn version_numbers(&self, file_id: &str) -> Vec<i64> {
        let response = self
            .request("GET", &format!("/api/files/{file_id}/versions"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .data()
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["version_number"].as_i64().unwrap())
            .collect()
    }
}

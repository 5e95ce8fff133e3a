//! Integration tests for folder operations.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const MISSING_ID: &str = "00000000-0000-0000-0000-999999999999";

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["status"], "ok");
}

#[tokio::test]
async fn test_folder_lifecycle() {
    let app = TestApp::new();
    let id = app.create_folder("docs").await;
    app.create_folder("src").await;

    let response = app
        .request("PUT", &format!("/api/folders/{id}"), Some(json!({ "name": "notes" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "notes");

    let response = app.request("GET", "/api/folders", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["notes", "src"]);

    let response = app.request("DELETE", &format!("/api/folders/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/folders/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_folder_blank_name() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/folders", Some(json!({ "title": "docs" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_folder_id() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folders/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_folder() {
    let app = TestApp::new();

    let get = app.request("GET", &format!("/api/folders/{MISSING_ID}"), None).await;
    let delete = app
        .request("DELETE", &format!("/api/folders/{MISSING_ID}"), None)
        .await;
    let files = app
        .request("GET", &format!("/api/folders/{MISSING_ID}/files"), None)
        .await;

    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(files.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_removes_files_and_versions() {
    let app = TestApp::new();
    let folder = app.create_folder("doomed").await;

    let mut files = Vec::new();
    for name in ["one.txt", "two.txt"] {
        let id = app.create_file(&folder, name, "v1").await;
        app.update_file(&id, "v2").await;
        app.update_file(&id, "v3").await;
        assert_eq!(app.version_numbers(&id).await, vec![3, 2, 1]);
        files.push(id);
    }

    let response = app.request("DELETE", &format!("/api/folders/{folder}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    for id in &files {
        let file = app.request("GET", &format!("/api/files/{id}"), None).await;
        assert_eq!(file.status, StatusCode::NOT_FOUND);

        let versions = app
            .request("GET", &format!("/api/files/{id}/versions"), None)
            .await;
        assert_eq!(versions.status, StatusCode::NOT_FOUND);

        for n in 1..=3 {
            let version = app
                .request("GET", &format!("/api/files/{id}/versions/{n}"), None)
                .await;
            assert_eq!(version.status, StatusCode::NOT_FOUND);
        }
    }
}

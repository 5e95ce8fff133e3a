//! Integration tests for file, version, diff, merge, and conflict
//! operations.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const MISSING_ID: &str = "00000000-0000-0000-0000-999999999999";

#[tokio::test]
async fn test_update_then_diff() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let file = app.create_file(&folder, "abc.txt", "a\nb\nc").await;

    let response = app.update_file(&file, "a\nx\nc").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["content"], "a\nx\nc");

    let v1 = app
        .request("GET", &format!("/api/files/{file}/versions/1"), None)
        .await;
    assert_eq!(v1.data()["content"], "a\nb\nc");

    let response = app
        .request("GET", &format!("/api/files/{file}/diff?from=1&to=2"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.data(),
        &json!(["--- v1", "+++ v2", "@@ -2,1 +2,1 @@", "-b", "+x"])
    );
}

#[tokio::test]
async fn test_self_diff_is_empty() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let file = app.create_file(&folder, "same.txt", "a\nb").await;

    let response = app
        .request("GET", &format!("/api/files/{file}/diff?from=1&to=1"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), &json!([]));
}

#[tokio::test]
async fn test_diff_errors() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let file = app.create_file(&folder, "one.txt", "a").await;

    let missing = app
        .request("GET", &format!("/api/files/{file}/diff?from=1&to=9"), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let no_query = app
        .request("GET", &format!("/api/files/{file}/diff"), None)
        .await;
    assert_eq!(no_query.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_merge_files() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let target = app.create_file(&folder, "target.txt", "hello").await;
    let source = app.create_file(&folder, "source.txt", "world").await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{target}/merge"),
            Some(json!({ "source_file_id": source })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["content"], "hello\nworld");
    assert_eq!(app.version_numbers(&target).await, vec![2, 1]);

    let source_after = app.request("GET", &format!("/api/files/{source}"), None).await;
    assert_eq!(source_after.data()["content"], "world");
    assert_eq!(app.version_numbers(&source).await, vec![1]);
}

#[tokio::test]
async fn test_merge_missing_source() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let target = app.create_file(&folder, "target.txt", "hello").await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{target}/merge"),
            Some(json!({ "source_file_id": MISSING_ID })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.version_numbers(&target).await, vec![1]);
}

#[tokio::test]
async fn test_resolve_conflict() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let file = app.create_file(&folder, "clash.txt", "old").await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file}/resolve"),
            Some(json!({ "resolved_content": "new" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["content"], "new");

    let prior = app
        .request("GET", &format!("/api/files/{file}/versions/1"), None)
        .await;
    assert_eq!(prior.data()["content"], "old");
    let latest = app
        .request("GET", &format!("/api/files/{file}/versions/2"), None)
        .await;
    assert_eq!(latest.data()["content"], "new");
}

#[tokio::test]
async fn test_create_file_errors() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;

    let unknown_folder = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "folder_id": MISSING_ID, "name": "a.txt", "content": "" })),
        )
        .await;
    assert_eq!(unknown_folder.status, StatusCode::NOT_FOUND);

    let blank_name = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "folder_id": folder, "name": "", "content": "" })),
        )
        .await;
    assert_eq!(blank_name.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_delete_files() {
    let app = TestApp::new();
    let folder = app.create_folder("work").await;
    let keep = app.create_file(&folder, "b.txt", "").await;
    let gone = app.create_file(&folder, "a.txt", "").await;

    let response = app
        .request("GET", &format!("/api/folders/{folder}/files"), None)
        .await;
    let names: Vec<&str> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);

    let response = app.request("DELETE", &format!("/api/files/{gone}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/files/{gone}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.request("GET", &format!("/api/files/{keep}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_file() {
    let app = TestApp::new();

    let response = app.update_file(MISSING_ID, "x").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_get_distinct_versions() {
    const WRITERS: i64 = 16;

    let app = TestApp::new();
    let folder = app.create_folder("race").await;
    let file = app.create_file(&folder, "race.txt", "seed").await;

    let requests = (0..WRITERS).map(|i| {
        let app = app.clone();
        let file = file.clone();
        tokio::spawn(async move { app.update_file(&file, &format!("writer-{i}")).await.status })
    });
    for status in futures::future::join_all(requests).await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let numbers = app.version_numbers(&file).await;
    assert_eq!(numbers, (1..=WRITERS + 1).rev().collect::<Vec<_>>());

    let latest = app
        .request("GET", &format!("/api/files/{file}/versions/{}", WRITERS + 1), None)
        .await;
    let current = app.request("GET", &format!("/api/files/{file}"), None).await;
    assert_eq!(latest.data()["content"], current.data()["content"]);
}

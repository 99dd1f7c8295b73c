//! HTTP API integration tests
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chatdeck_service::dto::{DeleteMemoResponse, HealthResponse, MemoResponse, MessageResponse, UserResponse};
use integration_tests::{assert_error, assert_json, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Chat history and presence
// ============================================================================

#[tokio::test]
async fn test_history_starts_empty() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/messages").await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_history_accepts_unparseable_limit() {
    let server = TestServer::start().await.unwrap();
    for path in ["/api/messages?limit=", "/api/messages?limit=abc", "/api/messages?limit=-1"] {
        let response = server.get(path).await.unwrap();
        let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(messages.is_empty(), "{path}");
    }
}

#[tokio::test]
async fn test_online_users_starts_empty() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/users/online").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.is_empty());
}

// ============================================================================
// Memos
// ============================================================================

#[tokio::test]
async fn test_memo_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let user_id = unique_user_id();

    let response = server
        .post("/api/memos", &memo_body("groceries", "milk", Some(&user_id)))
        .await
        .unwrap();
    let memo: MemoResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(memo.title, "groceries");
    assert_eq!(memo.user_id, user_id);

    let response = server
        .put(&format!("/api/memos/{}", memo.id), &json!({"content": "oat milk"}))
        .await
        .unwrap();
    let updated: MemoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "groceries");
    assert_eq!(updated.content, "oat milk");
    assert!(updated.updated_at >= memo.updated_at);

    let response = server.get(&format!("/api/memos/{user_id}")).await.unwrap();
    let memos: Vec<MemoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(memos, vec![updated]);

    let response = server.delete(&format!("/api/memos/{}", memo.id)).await.unwrap();
    let deleted: DeleteMemoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.success);

    let response = server.get(&format!("/api/memos/{user_id}")).await.unwrap();
    let memos: Vec<MemoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(memos.is_empty());
}

#[tokio::test]
async fn test_memo_defaults_to_anonymous() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/memos", &memo_body("note", "", None))
        .await
        .unwrap();
    let memo: MemoResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(memo.user_id, "anonymous");
}

#[tokio::test]
async fn test_memo_validation() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/memos", &memo_body("", "no title", None))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server.post("/api/memos", &json!({"content": 5})).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_memo_is_not_found() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put("/api/memos/missing", &json!({"title": "x"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.delete("/api/memos/missing").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

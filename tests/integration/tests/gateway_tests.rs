//! WebSocket relay integration tests
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use chatdeck_client::{ChatClient, ClientConfig, ClientEvent};
use chatdeck_gateway::protocol::ServerMessage;
use chatdeck_service::dto::{MessageResponse, UserResponse};
use integration_tests::{assert_json, fixtures::*, TestServer};
use reqwest::StatusCode;

const QUIET: Duration = Duration::from_millis(300);

fn online_names(msg: &ServerMessage) -> Vec<String> {
    match msg {
        ServerMessage::UserJoined { online_users, .. } | ServerMessage::UserLeft { online_users, .. } => {
            online_users.iter().map(|u| u.username.clone()).collect()
        }
        other => panic!("expected a presence frame, got {other:?}"),
    }
}

// ============================================================================
// Join / leave
// ============================================================================

#[tokio::test]
async fn test_join_is_announced_to_everyone() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();

    let joined = a.recv().await.unwrap();
    assert!(matches!(&joined, ServerMessage::UserJoined { username, .. } if username == "bob"));
    assert_eq!(online_names(&joined), vec!["alice", "bob"]);

    b.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_close_announces_user_left() {
    let server = TestServer::start().await.unwrap();
    let a = server.connect_as("alice", &unique_user_id()).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();

    a.close().await.unwrap();

    let left = b
        .recv_until(|msg| matches!(msg, ServerMessage::UserLeft { .. }))
        .await
        .unwrap();
    assert!(matches!(&left, ServerMessage::UserLeft { username, .. } if username == "alice"));
    assert_eq!(online_names(&left), vec!["bob"]);

    let response = server.get("/api/users/online").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "bob");
}

#[tokio::test]
async fn test_user_with_two_tabs_stays_online() {
    let server = TestServer::start().await.unwrap();
    let alice_id = unique_user_id();
    let tab1 = server.connect_as("alice", &alice_id).await.unwrap();
    let tab2 = server.connect_as("alice", &alice_id).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();

    tab1.close().await.unwrap();
    let left = b
        .recv_until(|msg| matches!(msg, ServerMessage::UserLeft { .. }))
        .await
        .unwrap();
    assert_eq!(online_names(&left), vec!["alice", "bob"]);

    tab2.close().await.unwrap();
    let left = b
        .recv_until(|msg| matches!(msg, ServerMessage::UserLeft { .. }))
        .await
        .unwrap();
    assert_eq!(online_names(&left), vec!["bob"]);
}

// ============================================================================
// Messages and typing
// ============================================================================

#[tokio::test]
async fn test_message_reaches_sender_and_peers() {
    let server = TestServer::start().await.unwrap();
    let alice_id = unique_user_id();
    let mut a = server.connect_as("alice", &alice_id).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();
    a.recv().await.unwrap(); // bob joined

    a.send_json(&message_frame("hi", "alice", None)).await.unwrap();

    for ws in [&mut a, &mut b] {
        let ServerMessage::NewMessage { message } = ws.recv().await.unwrap() else {
            panic!("expected newMessage");
        };
        assert_eq!(message.content, "hi");
        assert_eq!(message.user_id, alice_id);
        assert_eq!(message.channel, "general");
    }
}

#[tokio::test]
async fn test_typing_is_not_echoed() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();
    a.recv().await.unwrap(); // bob joined

    a.send_json(&typing_frame("alice", true)).await.unwrap();

    assert_eq!(
        b.recv().await.unwrap(),
        ServerMessage::UserTyping {
            username: "alice".to_string(),
            is_typing: true,
        }
    );
    a.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_history_reflects_relayed_messages() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();

    for content in ["m1", "m2", "m3"] {
        a.send_json(&message_frame(content, "alice", None)).await.unwrap();
        a.recv().await.unwrap();
    }
    a.send_json(&message_frame("elsewhere", "alice", Some("random")))
        .await
        .unwrap();
    a.recv().await.unwrap();

    let response = server.get("/api/messages?limit=2").await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["m2", "m3"]);

    let response = server.get("/api/messages?channel=random").await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "elsewhere");
}

#[tokio::test]
async fn test_history_unparseable_limit_uses_default() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();

    for content in ["m1", "m2", "m3"] {
        a.send_json(&message_frame(content, "alice", None)).await.unwrap();
        a.recv().await.unwrap();
    }

    for path in ["/api/messages?limit=", "/api/messages?limit=abc"] {
        let response = server.get(path).await.unwrap();
        let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m1", "m2", "m3"], "{path}");
    }
}

// ============================================================================
// Bad input
// ============================================================================

#[tokio::test]
async fn test_malformed_json_is_dropped() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();
    a.recv().await.unwrap(); // bob joined

    a.send_text("{not json").await.unwrap();
    a.send_text(r#"{"type":"shout","username":"alice"}"#).await.unwrap();

    a.expect_silence(QUIET).await.unwrap();
    b.expect_silence(QUIET).await.unwrap();

    // Still connected
    a.send_json(&typing_frame("alice", false)).await.unwrap();
    assert!(matches!(b.recv().await.unwrap(), ServerMessage::UserTyping { .. }));
}

#[tokio::test]
async fn test_invalid_message_errors_only_to_sender() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();
    let mut b = server.connect_as("bob", &unique_user_id()).await.unwrap();
    a.recv().await.unwrap(); // bob joined

    a.send_json(&message_frame(&"x".repeat(2001), "alice", None))
        .await
        .unwrap();

    let ServerMessage::Error { code, .. } = a.recv().await.unwrap() else {
        panic!("expected error frame");
    };
    assert_eq!(code, "CONTENT_TOO_LONG");
    b.expect_silence(QUIET).await.unwrap();

    let response = server.get("/api/messages").await.unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(messages.is_empty());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_shutdown_closes_open_sockets() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect_as("alice", &unique_user_id()).await.unwrap();

    let handle = tokio::spawn(server.shutdown());

    assert!(a.is_closed_within(Duration::from_secs(5)).await);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_client_library_round_trip() {
    let server = TestServer::start().await.unwrap();
    let mut client = ChatClient::connect(ClientConfig::new(server.ws_url()));
    assert_eq!(client.next_event().await, Some(ClientEvent::Connected));

    let handle = client.handle();
    handle.join("carol", Some("carol-1")).unwrap();
    let event = client.next_event().await.unwrap();
    assert!(matches!(
        event,
        ClientEvent::Message(ServerMessage::UserJoined { ref username, .. }) if username == "carol"
    ));

    handle.send_message("hello", "carol", None).unwrap();
    let Some(ClientEvent::Message(ServerMessage::NewMessage { message })) = client.next_event().await else {
        panic!("expected newMessage");
    };
    assert_eq!(message.user_id, "carol-1");

    client.shutdown().await;
}

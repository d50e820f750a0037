//! Relay Integration Tests
//!
//! Each test starts its own relay on an ephemeral port and drives it with
//! real WebSocket clients.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use chrono::DateTime;
use integration_tests::{assert_text, header_str, TestServer, TEST_ORIGIN};
use reqwest::{Method, StatusCode};
use serde_json::json;

// ============================================================================
// HTTP Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body = assert_text(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .request(Method::OPTIONS, "/health")
        .header("Origin", TEST_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(
        header_str(&response, "access-control-allow-origin"),
        Some(TEST_ORIGIN)
    );
    assert_eq!(
        header_str(&response, "access-control-allow-credentials"),
        Some("true")
    );

    let methods = header_str(&response, "access-control-allow-methods").unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("POST"));
    assert!(!methods.contains("DELETE"));
}

#[tokio::test]
async fn test_cors_never_echoes_other_origin() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .request(Method::GET, "/health")
        .header("Origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(
        header_str(&response, "access-control-allow-origin"),
        Some(TEST_ORIGIN)
    );
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_join_pushes_user_list() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    bob.join("bob", &["alice", "bob"]).await.unwrap();
    alice.wait_for_user_list(&["alice", "bob"]).await.unwrap();
}

#[tokio::test]
async fn test_disconnect_pushes_remaining_users() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    bob.join("bob", &["alice", "bob"]).await.unwrap();

    alice.close().await.unwrap();

    let list = bob.next_named("update-user-list").await.unwrap();
    assert_eq!(list.data, json!(["bob"]));
}

#[tokio::test]
async fn test_duplicate_name_routes_to_latest_connection() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut first = server.connect().await.unwrap();
    let mut second = server.connect().await.unwrap();
    let mut sender = server.connect().await.unwrap();

    first.join("alice", &["alice"]).await.unwrap();
    second.join("alice", &["alice", "alice"]).await.unwrap();
    first.wait_for_user_list(&["alice", "alice"]).await.unwrap();
    sender.wait_for_user_list(&["alice", "alice"]).await.unwrap();

    sender
        .send_event("private-message", json!({"to": "alice", "message": "ping"}))
        .await
        .unwrap();

    let dm = second.next_event().await.unwrap();
    assert_eq!(dm.event, "receive-private-message");
    first.expect_no_event().await.unwrap();
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_private_message_reaches_only_recipient() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    bob.join("bob", &["alice", "bob"]).await.unwrap();
    alice.wait_for_user_list(&["alice", "bob"]).await.unwrap();

    alice
        .send_event("private-message", json!({"to": "bob", "message": "hi"}))
        .await
        .unwrap();

    let dm = bob.next_event().await.unwrap();
    assert_eq!(dm.event, "receive-private-message");
    assert_eq!(dm.data["from"], "alice");
    assert_eq!(dm.data["content"], "hi");

    bob.expect_no_event().await.unwrap();
    alice.expect_no_event().await.unwrap();
}

#[tokio::test]
async fn test_broadcast_reaches_all_connections() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut lurker = server.connect().await.unwrap();
    let mut alice = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    lurker.wait_for_user_list(&["alice"]).await.unwrap();

    let content = json!({"text": "hello", "meta": {"b": 2, "a": 1}});
    alice
        .send_event(
            "send-broadcast-message",
            json!({"type": "text", "content": content.clone()}),
        )
        .await
        .unwrap();

    for client in [&mut alice, &mut lurker] {
        let msg = client.next_event().await.unwrap();
        assert_eq!(msg.event, "receive-message");
        assert_eq!(msg.data["user"], "alice");
        assert_eq!(msg.data["type"], "text");
        assert_eq!(msg.data["content"], content);
        let time = msg.data["time"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(time).is_ok());
    }
}

#[tokio::test]
async fn test_broadcast_before_join_is_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut stranger = server.connect().await.unwrap();
    let mut alice = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    stranger.wait_for_user_list(&["alice"]).await.unwrap();

    stranger
        .send_event("send-broadcast-message", json!({"type": "text", "content": "hi"}))
        .await
        .unwrap();

    alice.expect_no_event().await.unwrap();
    stranger.expect_no_event().await.unwrap();
}

#[tokio::test]
async fn test_typing_routing() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
    bob.join("bob", &["alice", "bob"]).await.unwrap();
    carol.join("carol", &["alice", "bob", "carol"]).await.unwrap();
    alice.wait_for_user_list(&["alice", "bob", "carol"]).await.unwrap();
    bob.wait_for_user_list(&["alice", "bob", "carol"]).await.unwrap();

    // Directed typing reaches the target only
    alice.send_event("typing", json!({"to": "bob"})).await.unwrap();
    let typing = bob.next_event().await.unwrap();
    assert_eq!(typing.event, "user-typing");
    assert_eq!(typing.data, json!({"user": "alice", "from": "alice"}));
    carol.expect_no_event().await.unwrap();

    // Undirected stop-typing reaches everyone but the sender
    alice.send_event("stop-typing", json!({})).await.unwrap();
    for client in [&mut bob, &mut carol] {
        let stop = client.next_event().await.unwrap();
        assert_eq!(stop.event, "user-stop-typing");
        assert_eq!(stop.data, json!({"user": "alice", "from": null}));
    }
    alice.expect_no_event().await.unwrap();

    // Unknown target produces nothing
    alice.send_event("typing", json!({"to": "dave"})).await.unwrap();
    bob.expect_no_event().await.unwrap();
    carol.expect_no_event().await.unwrap();
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = server.connect().await.unwrap();

    alice.send_raw("not json").await.unwrap();
    alice.send_event("no-such-event", json!({})).await.unwrap();
    alice.send_event("typing", json!("oops")).await.unwrap();
    alice.expect_no_event().await.unwrap();

    alice.join("alice", &["alice"]).await.unwrap();
}

//! HTTP surface integration tests
//!
//! Exercises the router end to end with `axum_test::TestServer` against a
//! migrated in-memory database.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chatline::server::init::create_app_with_pool;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn test_server() -> TestServer {
    let pool = common::test_pool().await;
    TestServer::new(create_app_with_pool(pool)).expect("failed to start test server")
}

async fn register(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let response = server
        .post("/api/users/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "hunter2hunter2",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    (token, user_id)
}

#[tokio::test]
async fn test_liveness_route() {
    let server = test_server().await;
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "API is running...");
}

#[tokio::test]
async fn test_register_login_round_trip() {
    let server = test_server().await;
    let (_, user_id) = register(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/api/users/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "hunter2hunter2",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["user"]["id"].as_str().unwrap(), user_id);
    // Password hashes never leave the server.
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_registration_conflicts() {
    let server = test_server().await;
    register(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/api/users/register")
        .json(&json!({
            "name": "Imposter",
            "email": "alice@example.com",
            "password": "hunter2hunter2",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_send_message_requires_all_fields() {
    let server = test_server().await;

    let response = server
        .post("/api/messages/send")
        .json(&json!({ "sender": "A", "receiver": "B" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "text is required");

    // Nothing was persisted on the failed path.
    let history = server
        .get("/api/messages/get")
        .add_query_param("sender", "A")
        .add_query_param("receiver", "B")
        .await;
    assert_eq!(history.status_code(), StatusCode::OK);
    assert_eq!(history.json::<Vec<Value>>().len(), 0);
}

#[tokio::test]
async fn test_send_and_fetch_messages_over_http() {
    let server = test_server().await;

    let response = server
        .post("/api/messages/send")
        .json(&json!({ "sender": "A", "receiver": "B", "text": "hi" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let sent: Value = response.json();
    assert_eq!(sent["sender"], "A");

    // Either argument order returns the same single-message history.
    for (sender, receiver) in [("A", "B"), ("B", "A")] {
        let history = server
            .get("/api/messages/get")
            .add_query_param("sender", sender)
            .add_query_param("receiver", receiver)
            .await;
        let messages: Vec<Value> = history.json();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["text"], "hi");
    }
}

#[tokio::test]
async fn test_room_lifecycle_over_http() {
    let server = test_server().await;
    let (alice_token, _) = register(&server, "Alice", "alice@example.com").await;
    let (bob_token, _) = register(&server, "Bob", "bob@example.com").await;

    // Creating a room requires a bearer token.
    let response = server
        .post("/api/rooms/create")
        .json(&json!({ "name": "algo-club" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/rooms/create")
        .authorization_bearer(&alice_token)
        .json(&json!({ "name": "algo-club" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let room: Value = response.json();
    let room_id = room["id"].as_str().unwrap().to_string();

    // Duplicate names are rejected with 409.
    let response = server
        .post("/api/rooms/create")
        .authorization_bearer(&bob_token)
        .json(&json!({ "name": "algo-club" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Bob joins; joining twice changes nothing.
    for _ in 0..2 {
        let response = server
            .post(&format!("/api/rooms/{room_id}/join"))
            .authorization_bearer(&bob_token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let members: Vec<Value> = server
        .get(&format!("/api/rooms/{room_id}/members"))
        .await
        .json();
    assert_eq!(members.len(), 2);

    let stats: Value = server
        .get(&format!("/api/rooms/{room_id}/stats"))
        .await
        .json();
    assert_eq!(stats["total_members"], 2);
    assert_eq!(stats["total_messages"], 0);
    assert_eq!(stats["unique_users_texted"], 0);
}

#[tokio::test]
async fn test_unknown_room_is_404() {
    let server = test_server().await;
    let response = server.get("/api/rooms/nope/stats").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_patch_to_taken_email_is_409() {
    let server = test_server().await;
    register(&server, "Alice", "alice@example.com").await;
    let (_, bob_id) = register(&server, "Bob", "bob@example.com").await;

    let response = server
        .put(&format!("/api/profile/{bob_id}"))
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "email already exists");

    // Bob's email is unchanged.
    let profile: Value = server.get(&format!("/api/profile/{bob_id}")).await.json();
    assert_eq!(profile["email"], "bob@example.com");
}

#[tokio::test]
async fn test_profile_get_defaults_and_partial_put() {
    let server = test_server().await;
    let (_, user_id) = register(&server, "Alice", "alice@example.com").await;

    let profile: Value = server.get(&format!("/api/profile/{user_id}")).await.json();
    assert_eq!(profile["credit"], 0.0);
    assert_eq!(profile["mobile"], "");
    assert_eq!(profile["interested_areas"], json!([]));

    let response = server
        .put(&format!("/api/profile/{user_id}"))
        .json(&json!({ "credit": 12.5, "interested_areas": ["rust"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Updating mobile alone leaves credit in place.
    let profile: Value = server
        .put(&format!("/api/profile/{user_id}"))
        .json(&json!({ "mobile": "555-0100" }))
        .await
        .json();
    assert_eq!(profile["credit"], 12.5);
    assert_eq!(profile["mobile"], "555-0100");
    assert_eq!(profile["interested_areas"], json!(["rust"]));
}

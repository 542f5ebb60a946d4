//! User HTTP handler tests

use super::{build_test_router, get_json, post_json, put_json, TestAppState};
use crate::api::create_test_identity_token_for_user;
use axum::http::StatusCode;
use serde_json::json;
use todo_core::domain::User;
use todo_core::service::user::hash_password;

fn stored_user(username: &str, password: &str) -> User {
    User {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: hash_password(password).unwrap(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_register_returns_201_with_id() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/api/users",
        None,
        &json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "Secret123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["succeeded"], true);
    assert!(body["result"]["id"].is_string());
    assert!(body["result"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_invalid_email_returns_400() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/api/users",
        None,
        &json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "Secret123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["errors"][0], "Email is not valid");
}

#[tokio::test]
async fn test_register_duplicate_email_returns_400() {
    let state = TestAppState::new();
    state.user_repo.add_user(stored_user("alice", "Secret123")).await;
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/api/users",
        None,
        &json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "Secret123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["succeeded"], false);
}

#[tokio::test]
async fn test_authenticate_returns_token_accepted_by_router() {
    let state = TestAppState::new();
    let user = stored_user("bob", "Secret123");
    let user_id = user.id;
    state.user_repo.add_user(user).await;
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/api/users/authenticate",
        None,
        &json!({ "username": "bob", "password": "Secret123" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["result"]["id"], user_id.to_string());
    assert_eq!(body["result"]["email"], "bob@example.com");
    let token = body["result"]["token"].as_str().unwrap().to_string();

    let (status, _) = get_json(&app, "/api/todoLists", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_authenticate_unknown_user_returns_400() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/api/users/authenticate",
        None,
        &json!({ "username": "ghost", "password": "Secret123" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["errors"][0],
        "Username or password is incorrect"
    );
}

#[tokio::test]
async fn test_change_password_updates_hash() {
    let state = TestAppState::new();
    let user = stored_user("carol", "Secret123");
    let user_id = user.id;
    state.user_repo.add_user(user).await;
    let token = create_test_identity_token_for_user(user_id);
    let app = build_test_router(state.clone());

    let (status, body) = put_json(
        &app,
        "/api/users/changePassword",
        Some(&token),
        &json!({ "oldPassword": "Secret123", "newPassword": "Better456" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["result"]["id"], user_id.to_string());

    let stored = state
        .user_service
        .authenticate(todo_core::domain::AuthenticateUserInput {
            username: "carol".to_string(),
            password: "Better456".to_string(),
        })
        .await;
    assert!(stored.is_ok());
}

#[tokio::test]
async fn test_change_password_too_short_returns_400() {
    let state = TestAppState::new();
    let user = stored_user("dave", "Secret123");
    let user_id = user.id;
    state.user_repo.add_user(user).await;
    let token = create_test_identity_token_for_user(user_id);
    let app = build_test_router(state);

    let (status, body) = put_json(
        &app,
        "/api/users/changePassword",
        Some(&token),
        &json!({ "oldPassword": "Secret123", "newPassword": "abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["errors"][0],
        "Password must be between 6 and 128 characters"
    );
}

#[tokio::test]
async fn test_health_and_ready() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body) = get_json(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "healthy");

    let (status, _) = get_json(&app, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

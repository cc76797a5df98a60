//! Integration tests for registration, login, logout, and session behavior.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p quillpad-cli -- migrate)
//! - The web server running (cargo run -p quillpad-web)
//!
//! Run with: cargo test -p quillpad-integration-tests -- --ignored

use quillpad_integration_tests::{
    base_url, client, location, login, register, register_and_login, unique_username,
};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_root_redirects_to_login() {
    let client = client();

    let resp = client
        .get(base_url())
        .send()
        .await
        .expect("Failed to fetch root");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_duplicate_registration_conflicts() {
    let client = client();
    let username = unique_username("alice");

    // First registration succeeds and redirects to login
    let resp = register(&client, &username, "pw1").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login?success=registered");

    // Second registration with the same username responds 200 plain text,
    // no redirect, and creates no second record (unique constraint)
    let resp = register(&client, &username, "pw2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert_eq!(body, "User already exists");

    // The original credentials still log in; the second password never took
    let resp = login(&client, &username, "pw1").await;
    assert_eq!(location(&resp), "/results");
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_login_with_wrong_password_fails() {
    let client = client();
    let username = unique_username("alice");

    let resp = register(&client, &username, "pw1").await;
    assert!(resp.status().is_redirection());

    // Wrong password: redirected back to the login form with an error
    let resp = login(&client, &username, "wrong").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login?error=credentials");

    // No session was created
    let resp = client
        .get(format!("{}/session", base_url()))
        .send()
        .await
        .expect("Failed to fetch session state");
    let state: Value = resp.json().await.expect("Failed to parse session state");
    assert!(state["current_user"].is_null());
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_login_creates_session_and_empty_list() {
    let client = client();
    let username = register_and_login(&client, "alice", "pw1").await;

    // Session state now carries the identity reference
    let resp = client
        .get(format!("{}/session", base_url()))
        .send()
        .await
        .expect("Failed to fetch session state");
    let state: Value = resp.json().await.expect("Failed to parse session state");
    assert_eq!(state["current_user"]["username"], username.as_str());

    // Fresh account: the list view renders with no entries
    let resp = client
        .get(format!("{}/results", base_url()))
        .send()
        .await
        .expect("Failed to fetch results");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read results");
    assert!(body.contains("No entries yet"));
    assert!(body.contains(&username));
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_login_page_redirects_when_authenticated() {
    let client = client();
    register_and_login(&client, "alice", "pw1").await;

    let resp = client
        .get(format!("{}/login", base_url()))
        .send()
        .await
        .expect("Failed to fetch login page");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/results");
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_logout_destroys_session() {
    let client = client();
    register_and_login(&client, "alice", "pw1").await;

    // Logout redirects to the anonymous landing page
    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    // The list view is no longer reachable: redirect to login, no data
    let resp = client
        .get(format!("{}/results", base_url()))
        .send()
        .await
        .expect("Failed to fetch results");
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login");

    // Logout is idempotent
    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out twice");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires a running quillpad-web server"]
async fn test_protected_routes_require_session() {
    let client = client();

    // No session at all: every protected route bounces to login
    let resp = client
        .get(format!("{}/results", base_url()))
        .send()
        .await
        .expect("Failed to fetch results");
    assert_eq!(location(&resp), "/login");

    let resp = client
        .post(format!("{}/add", base_url()))
        .form(&[("title", "t"), ("description", "d")])
        .send()
        .await
        .expect("Failed to post add");
    assert_eq!(location(&resp), "/login");
}

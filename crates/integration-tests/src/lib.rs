//! Integration tests for Quillpad.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p quillpad-cli -- migrate
//!
//! # Start the server
//! cargo run -p quillpad-web
//!
//! # Run integration tests
//! cargo test -p quillpad-integration-tests -- --ignored
//! ```
//!
//! Tests drive the HTTP surface of a running instance with a cookie-holding
//! client, so each test registers its own throwaway users.

use reqwest::{Client, Response, redirect::Policy};
use uuid::Uuid;

/// Base URL for the application (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("QUILLPAD_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with a cookie store and redirects disabled.
///
/// Redirects are disabled so tests can assert on `Location` headers; each
/// client holds its own session cookie, so two clients are two users.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username for this test run.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Register a user via the HTTP surface.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn register(client: &Client, username: &str, password: &str) -> Response {
    client
        .post(format!("{}/register", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send register request")
}

/// Log in via the HTTP surface. The session cookie lands in the client's
/// cookie store.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn login(client: &Client, username: &str, password: &str) -> Response {
    client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to send login request")
}

/// Register a fresh user and log them in, returning the username.
///
/// # Panics
///
/// Panics if registration or login does not redirect as expected.
pub async fn register_and_login(client: &Client, prefix: &str, password: &str) -> String {
    let username = unique_username(prefix);

    let resp = register(client, &username, password).await;
    assert!(resp.status().is_redirection(), "registration should redirect");

    let resp = login(client, &username, password).await;
    assert!(resp.status().is_redirection(), "login should redirect");
    assert_eq!(location(&resp), "/results");

    username
}

/// Create an entry via the HTTP surface.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn add_entry(client: &Client, title: &str, description: &str) -> Response {
    client
        .post(format!("{}/add", base_url()))
        .form(&[("title", title), ("description", description)])
        .send()
        .await
        .expect("Failed to send add request")
}

/// Fetch the results page body for the client's current session.
///
/// # Panics
///
/// Panics if the request fails or does not return 200.
pub async fn results_page(client: &Client) -> String {
    let resp = client
        .get(format!("{}/results", base_url()))
        .send()
        .await
        .expect("Failed to fetch results page");
    assert!(resp.status().is_success(), "results page should render");
    resp.text().await.expect("Failed to read results page")
}

/// Extract entry ids from the results page markup.
///
/// Entries render an edit form with `action="/edit/{id}"`.
#[must_use]
pub fn entry_ids(html: &str) -> Vec<String> {
    html.split("action=\"/edit/")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(ToString::to_string)
        .collect()
}

/// Read the `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing or not valid UTF-8.
#[must_use]
pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .expect("redirect response should carry a Location header")
        .to_str()
        .expect("Location header should be valid UTF-8")
        .to_string()
}

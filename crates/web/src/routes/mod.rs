//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Redirect to /login
//! GET  /health          - Health check
//!
//! # Auth
//! GET  /register        - Registration page
//! POST /register        - Register action (200 plain text on duplicate)
//! GET  /login           - Login page (redirects to /results if logged in)
//! POST /login           - Login action
//! GET  /logout          - Logout action
//! GET  /session         - Raw session state as JSON (debug)
//!
//! # Entries (require auth)
//! GET  /results         - List the caller's entries
//! POST /add             - Create an entry owned by the caller
//! POST /edit/{id}       - Update a caller-owned entry (404 if absent)
//! POST /delete/{id}     - Delete a caller-owned entry (404 if absent)
//! ```

pub mod auth;
pub mod entries;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/session", get(auth::session_debug))
}

/// Create the entry routes router.
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/results", get(entries::results))
        .route("/add", post(entries::add))
        .route("/edit/{id}", post(entries::edit))
        .route("/delete/{id}", post(entries::delete))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        .merge(auth_routes())
        .merge(entry_routes())
}

//! Authentication route handlers.
//!
//! Handles registration, login, logout, and the session debug endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{RedirectIfAuthenticated, clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

// =============================================================================
// Root Route
// =============================================================================

/// Anonymous landing: send visitors to the login page.
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let error = query.error.as_deref().map(|code| match code {
        "invalid_username" => "Usernames must be 1-64 characters with no spaces.",
        _ => "Registration failed. Please try again.",
    });

    RegisterTemplate { error }
}

/// Handle registration form submission.
///
/// On a duplicate username, responds with 200 plain text instead of a
/// redirect; on success, redirects to the login page.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    match AuthService::new(state.pool())
        .register(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Redirect::to("/login?success=registered").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            tracing::warn!(username = %form.username, "registration conflict");
            (StatusCode::OK, "User already exists").into_response()
        }
        Err(AuthError::InvalidUsername(e)) => {
            tracing::warn!(error = %e, "registration rejected");
            Redirect::to("/register?error=invalid_username").into_response()
        }
        Err(e) => crate::error::AppError::from(e).into_response(),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors are redirected to the main view by the
/// `RedirectIfAuthenticated` guard.
pub async fn login_page(
    _guard: RedirectIfAuthenticated,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let error = query.error.as_deref().map(|code| match code {
        "credentials" => "Invalid username or password.",
        "session" => "Could not establish a session. Please try again.",
        _ => "Login failed. Please try again.",
    });
    let success = query.success.as_deref().map(|code| match code {
        "registered" => "Account created. Log in to continue.",
        _ => "Done.",
    });

    LoginTemplate { error, success }
}

/// Handle login form submission.
///
/// On success, stores the identity reference in a fresh session and
/// redirects to the main view. Every failure redirects back to the login
/// page with a visible message.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
                tracing::error!(error = %e, "failed to set session");
                return Redirect::to("/login?error=session").into_response();
            }

            set_sentry_user(&user.id, Some(user.username.as_str()));
            tracing::info!(user_id = %user.id, "login successful");
            Redirect::to("/results").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "login failed");
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => crate::error::AppError::from(e).into_response(),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the server-side session and redirects to the anonymous landing
/// page. Idempotent: logging out without a session is a no-op.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "failed to clear session");
    }

    // Also destroy the entire session record
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session");
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}

// =============================================================================
// Debug Route
// =============================================================================

/// Return the raw session state as JSON.
///
/// Debug endpoint: exposes the session id, expiry, and the stored identity
/// reference (if any).
pub async fn session_debug(session: Session) -> Response {
    let current_user: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    Json(json!({
        "session_id": session.id().map(|id| id.to_string()),
        "expiry_date": session.expiry_date().to_string(),
        "current_user": current_user,
    }))
    .into_response()
}

//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring authentication in route handlers. The
//! session only holds a serialized reference to the identity; `RequireUser`
//! reconstructs the full [`User`] from the credential store on every request,
//! so ownership checks never trust client-supplied data.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, User, session_keys};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// If no valid session exists, returns a redirect to the login page. On
/// success the handler receives the full user record, re-fetched from the
/// credential store.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireUser(pub User);

/// Error returned when authentication is required but missing or unresolvable.
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// Unauthorized response (session layer missing).
    Unauthorized,
    /// The credential store failed while resolving the session.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        // Get the stored identity reference from the session
        let current: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        // Re-fetch the full identity from the credential store
        match AuthService::new(state.pool()).resolve_user(current.id).await {
            Ok(user) => Ok(Self(user)),
            Err(AuthError::UserNotFound) => {
                // The session references an identity that no longer exists.
                // Not silently downgraded: log it, drop the stale reference.
                tracing::error!(
                    user_id = %current.id,
                    "session references a user missing from the store"
                );
                let _ = session
                    .remove::<CurrentUser>(session_keys::CURRENT_USER)
                    .await;
                Err(AuthRejection::RedirectToLogin)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve session user");
                Err(AuthRejection::Internal)
            }
        }
    }
}

/// Extractor that redirects authenticated users away.
///
/// Inverse guard for the login entry point: if a valid session already
/// exists, redirect to the main view instead of rendering the form again.
pub struct RedirectIfAuthenticated;

impl<S> FromRequestParts<S> for RedirectIfAuthenticated
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        if current.is_some() {
            return Err(Redirect::to("/results"));
        }

        Ok(Self)
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

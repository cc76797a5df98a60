//! Entry route handlers.
//!
//! Every operation here is scoped to the authenticated caller: listing
//! filters by owner, creation stamps the owner from the session, and
//! update/delete match on both the entry id and the owner id.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;

use quillpad_core::EntryId;

use crate::db::{EntryRepository, RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::Entry;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Entry create/update form data.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub description: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Render-ready view of an entry.
pub struct EntryView {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            created_at: entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Entry list page template.
#[derive(Template, WebTemplate)]
#[template(path = "entries/results.html")]
pub struct ResultsTemplate {
    pub username: String,
    pub entries: Vec<EntryView>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the caller's entries.
///
/// Fetches the caller's entries and their own identity record for display.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the identity record vanished between
/// session resolution and this fetch (defensive check).
pub async fn results(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<ResultsTemplate> {
    let entries = EntryRepository::new(state.pool())
        .list_for_owner(user.id)
        .await?;

    let user = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(ResultsTemplate {
        username: user.username.into_inner(),
        entries: entries.into_iter().map(EntryView::from).collect(),
    })
}

/// Create a new entry owned by the caller.
///
/// The owner id comes from the authenticated session, never from the form.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<EntryForm>,
) -> Result<Redirect> {
    let entry = EntryRepository::new(state.pool())
        .create(user.id, &form.title, &form.description)
        .await?;

    tracing::debug!(entry_id = %entry.id, owner_id = %user.id, "entry created");

    Ok(Redirect::to("/results"))
}

/// Update the title and description of a caller-owned entry.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entry matches both the id and the
/// caller's ownership - a non-owner's edit is indistinguishable from a
/// missing entry.
pub async fn edit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect> {
    EntryRepository::new(state.pool())
        .update(id, user.id, &form.title, &form.description)
        .await
        .map_err(not_found_or_db)?;

    Ok(Redirect::to("/results"))
}

/// Delete a caller-owned entry.
///
/// Carries the same ownership filter as [`edit`], so deleting another
/// owner's entry fails with the same 404.
pub async fn delete(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<EntryId>,
) -> Result<Redirect> {
    EntryRepository::new(state.pool())
        .delete(id, user.id)
        .await
        .map_err(not_found_or_db)?;

    Ok(Redirect::to("/results"))
}

/// Map a repository miss to a 404 without leaking whether the entry exists
/// under a different owner.
fn not_found_or_db(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound("entry not found".to_string()),
        other => AppError::Database(other),
    }
}

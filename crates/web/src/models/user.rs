//! User domain types.

use chrono::{DateTime, Utc};

use quillpad_core::{UserId, Username};

/// A registered user (domain type).
///
/// Immutable after registration: there is no update or delete path.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, generated by the store on insert.
    pub id: UserId,
    /// Login username, unique across the store.
    pub username: Username,
    /// Password, stored as submitted.
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

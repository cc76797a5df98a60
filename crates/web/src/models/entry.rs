//! Entry domain types.

use chrono::{DateTime, Utc};

use quillpad_core::{EntryId, UserId};

/// A user-owned note entry (domain type).
///
/// Every read, update, and delete of an entry is scoped to its owner; an
/// entry is never visible or mutable to a non-owner.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Unique entry ID, generated by the store on insert.
    pub id: EntryId,
    /// User who owns this entry. Stamped from the authenticated session at
    /// creation, never taken from client input.
    pub owner_id: UserId,
    /// Entry title, free-form.
    pub title: String,
    /// Entry body, free-form.
    pub description: String,
    /// When this entry was created. Fixed at insert, never updated.
    pub created_at: DateTime<Utc>,
}

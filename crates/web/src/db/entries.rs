//! Entry repository for database operations.
//!
//! Every query and mutation here carries the ownership filter: an entry is
//! only ever visible or mutable through its owner's id.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use quillpad_core::{EntryId, UserId};

use super::RepositoryError;
use crate::models::Entry;

/// Database row for an entry.
#[derive(sqlx::FromRow)]
struct EntryRow {
    id: EntryId,
    owner_id: UserId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Repository for entry database operations.
pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    /// Create a new entry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get all entries owned by a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Entry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, owner_id, title, description, created_at
            FROM entries
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    /// Create a new entry owned by `owner_id`.
    ///
    /// `created_at` is stamped by the database at insert time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner_id: UserId,
        title: &str,
        description: &str,
    ) -> Result<Entry, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            INSERT INTO entries (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at
            ",
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update the title and description of an entry matching both `id` and
    /// `owner_id`.
    ///
    /// The owner predicate protects against cross-owner edits: a request
    /// targeting another user's entry matches zero rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry matches both predicates.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: EntryId,
        owner_id: UserId,
        title: &str,
        description: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE entries
            SET title = $1, description = $2
            WHERE id = $3 AND owner_id = $4
            ",
        )
        .bind(title)
        .bind(description)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an entry matching both `id` and `owner_id`.
    ///
    /// Carries the same owner predicate as [`update`](Self::update), so a
    /// non-owner's delete matches zero rows and the entry survives.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry matches both predicates.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: EntryId, owner_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM entries
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id)
        .bind(owner_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

//! Repository for the `admin_notes` table.
//!
//! Notes are append-only from the UI's perspective; update and delete are
//! restricted by the handlers to the authoring admin or the ADMIN role.

use sqlx::PgPool;

use cardvault_core::types::DbId;

use crate::models::admin_note::AdminNote;

/// Column list for `admin_notes` queries.
const COLUMNS: &str = "\
    id, admin_id, note_type, reference_id, content, created_at, updated_at";

/// Provides CRUD operations for admin notes.
pub struct AdminNoteRepo;

impl AdminNoteRepo {
    /// Create a note attached to `(note_type, reference_id)`.
    pub async fn create(
        pool: &PgPool,
        admin_id: DbId,
        note_type: &str,
        reference_id: DbId,
        content: &str,
    ) -> Result<AdminNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_notes (admin_id, note_type, reference_id, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminNote>(&query)
            .bind(admin_id)
            .bind(note_type)
            .bind(reference_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List notes for one attachment point, newest first.
    pub async fn list_for_reference(
        pool: &PgPool,
        note_type: &str,
        reference_id: DbId,
    ) -> Result<Vec<AdminNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_notes \
             WHERE note_type = $1 AND reference_id = $2 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AdminNote>(&query)
            .bind(note_type)
            .bind(reference_id)
            .fetch_all(pool)
            .await
    }

    /// Find a note by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminNote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_notes WHERE id = $1");
        sqlx::query_as::<_, AdminNote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a note's content.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<AdminNote>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_notes SET content = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminNote>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

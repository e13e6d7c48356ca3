//! Repository for the `inspections` table.

use antemortem_core::inspection::STATUS_IN_PROGRESS;
use antemortem_core::types::DbId;

use crate::models::inspection::{CreateInspection, Inspection, UpdateInspection};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, timestamp, inspector_id, animal_id, status, notes, deleted_at";

/// Provides CRUD operations for inspections.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Insert a new inspection, returning the created row.
    ///
    /// The timestamp is set server-side and status starts as `in_progress`.
    pub async fn create(
        pool: &DbPool,
        input: &CreateInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections (timestamp, inspector_id, animal_id, status, notes)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(chrono::Utc::now())
            .bind(&input.inspector_id)
            .bind(&input.animal_id)
            .bind(STATUS_IN_PROGRESS)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an inspection by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE id = ? AND deleted_at IS NULL");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inspections in creation order. Excludes soft-deleted rows.
    ///
    /// Callers are expected to pass already-clamped `skip` / `limit`
    /// (see [`crate::clamp_limit`] / [`crate::clamp_offset`]).
    pub async fn list(pool: &DbPool, skip: i64, limit: i64) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspections
             WHERE deleted_at IS NULL
             ORDER BY id ASC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    /// Update an inspection. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateInspection,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!(
            "UPDATE inspections SET
                status = COALESCE(?, status),
                notes = COALESCE(?, notes)
             WHERE id = ? AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an inspection by ID. Returns `true` if a row was marked
    /// deleted.
    ///
    /// Child detections and images keep their foreign keys; inspections
    /// are never hard-deleted.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE inspections SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(chrono::Utc::now())
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

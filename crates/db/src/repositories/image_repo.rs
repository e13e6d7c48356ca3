//! Repository for the `images` table.

use antemortem_core::types::DbId;

use crate::models::image::{CreateImage, Image};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, inspection_id, file_path, timestamp, camera_id, metadata, deleted_at";

/// Provides CRUD operations for image records.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image record, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (inspection_id, file_path, timestamp, camera_id, metadata)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(input.inspection_id)
            .bind(&input.file_path)
            .bind(chrono::Utc::now())
            .bind(&input.camera_id)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// Find an image record by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ? AND deleted_at IS NULL");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all image records for an inspection, in storage order.
    /// Excludes soft-deleted rows.
    pub async fn list_by_inspection(
        pool: &DbPool,
        inspection_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images
             WHERE inspection_id = ? AND deleted_at IS NULL
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }

    /// Soft-delete an image record by ID. Returns `true` if a row was
    /// marked deleted. The underlying file is not touched.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE images SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(chrono::Utc::now())
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

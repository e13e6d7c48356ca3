//! Repository for the `detections` table.

use antemortem_core::types::DbId;

use crate::models::detection::{CreateDetection, Detection};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, inspection_id, image_id, timestamp, lesion_type, confidence_score, \
    location_data, verified, verified_by";

/// Provides CRUD operations for detections.
pub struct DetectionRepo;

impl DetectionRepo {
    /// Insert a new detection, returning the created row.
    ///
    /// New detections are unverified; the timestamp is set server-side.
    pub async fn create(pool: &DbPool, input: &CreateDetection) -> Result<Detection, sqlx::Error> {
        let query = format!(
            "INSERT INTO detections
                (inspection_id, image_id, timestamp, lesion_type, confidence_score, location_data)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Detection>(&query)
            .bind(input.inspection_id)
            .bind(input.image_id)
            .bind(chrono::Utc::now())
            .bind(&input.lesion_type)
            .bind(input.confidence_score)
            .bind(&input.location_data)
            .fetch_one(pool)
            .await
    }

    /// Find a detection by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Detection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detections WHERE id = ?");
        sqlx::query_as::<_, Detection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all detections for an inspection, in storage order.
    pub async fn list_by_inspection(
        pool: &DbPool,
        inspection_id: DbId,
    ) -> Result<Vec<Detection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detections WHERE inspection_id = ? ORDER BY id ASC"
        );
        sqlx::query_as::<_, Detection>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }

    /// Set the verification state of a detection, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists. Both fields are
    /// replaced: verifying writes the verifier, un-verifying clears it.
    pub async fn update_verification(
        pool: &DbPool,
        id: DbId,
        verified: bool,
        verified_by: Option<&str>,
    ) -> Result<Option<Detection>, sqlx::Error> {
        let query = format!(
            "UPDATE detections SET verified = ?, verified_by = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Detection>(&query)
            .bind(verified)
            .bind(verified_by)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a detection by ID. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM detections WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `camera_configs` table.
//!
//! Camera configurations are keyed by the external `camera_id` (unique) and
//! never hard-deleted; removal deactivates the row so the configuration
//! survives for a later re-configure.

use antemortem_core::types::DbId;

use crate::models::camera_config::{CameraConfig, CreateCameraConfig};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, camera_id, name, settings, is_active, last_updated";

/// Provides CRUD operations for camera configurations.
pub struct CameraConfigRepo;

impl CameraConfigRepo {
    /// Insert a new camera configuration, returning the created row.
    /// New configurations start active.
    pub async fn create(
        pool: &DbPool,
        input: &CreateCameraConfig,
    ) -> Result<CameraConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO camera_configs (camera_id, name, settings, is_active, last_updated)
             VALUES (?, ?, ?, 1, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CameraConfig>(&query)
            .bind(&input.camera_id)
            .bind(&input.name)
            .bind(&input.settings)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a configuration by its external camera ID, active or not.
    pub async fn find_by_camera_id(
        pool: &DbPool,
        camera_id: &str,
    ) -> Result<Option<CameraConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camera_configs WHERE camera_id = ?");
        sqlx::query_as::<_, CameraConfig>(&query)
            .bind(camera_id)
            .fetch_optional(pool)
            .await
    }

    /// List all active camera configurations, in storage order.
    pub async fn list_active(pool: &DbPool) -> Result<Vec<CameraConfig>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM camera_configs WHERE is_active = 1 ORDER BY id ASC");
        sqlx::query_as::<_, CameraConfig>(&query).fetch_all(pool).await
    }

    /// Replace the settings of an existing configuration, returning the
    /// updated row.
    ///
    /// Re-activates the row and refreshes `last_updated`; configuring a
    /// camera always makes it available again. Returns `None` if no row
    /// with the given `camera_id` exists.
    pub async fn update_settings(
        pool: &DbPool,
        camera_id: &str,
        settings: &serde_json::Value,
    ) -> Result<Option<CameraConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE camera_configs SET settings = ?, is_active = 1, last_updated = ?
             WHERE camera_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CameraConfig>(&query)
            .bind(settings)
            .bind(chrono::Utc::now())
            .bind(camera_id)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a configuration by its external camera ID. Returns `true`
    /// if an active row was deactivated.
    pub async fn deactivate(pool: &DbPool, camera_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE camera_configs SET is_active = 0, last_updated = ?
             WHERE camera_id = ? AND is_active = 1",
        )
        .bind(chrono::Utc::now())
        .bind(camera_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a configuration by its internal row ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<CameraConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camera_configs WHERE id = ?");
        sqlx::query_as::<_, CameraConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

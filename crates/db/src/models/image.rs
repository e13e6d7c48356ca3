//! Image entity models and DTOs.
//!
//! Rows reference externally stored image files by path; bytes are never
//! stored in the database.

use antemortem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub inspection_id: DbId,
    pub file_path: String,
    pub timestamp: Timestamp,
    /// Camera that captured the frame, when known.
    pub camera_id: Option<String>,
    /// Free-form capture metadata (exposure, dimensions, ...).
    pub metadata: Option<serde_json::Value>,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new image record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    pub inspection_id: DbId,
    pub file_path: String,
    pub camera_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

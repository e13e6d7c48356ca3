//! Detection entity models and DTOs.

use antemortem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `detections` table.
///
/// `location_data` holds the bounding region as JSON
/// (`{"x", "y", "width", "height"}` in pixels).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Detection {
    pub id: DbId,
    pub inspection_id: DbId,
    /// Captured frame this detection was found in, when one was recorded.
    pub image_id: Option<DbId>,
    pub timestamp: Timestamp,
    pub lesion_type: String,
    pub confidence_score: f64,
    pub location_data: serde_json::Value,
    pub verified: bool,
    pub verified_by: Option<String>,
}

/// DTO for creating a new detection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDetection {
    pub inspection_id: DbId,
    pub image_id: Option<DbId>,
    pub lesion_type: String,
    pub confidence_score: f64,
    pub location_data: serde_json::Value,
}

/// DTO for updating the verification state of a detection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDetectionVerification {
    pub verified: bool,
    pub verified_by: Option<String>,
}

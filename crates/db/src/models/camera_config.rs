//! Camera configuration entity models and DTOs.

use antemortem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `camera_configs` table.
///
/// `settings` is a JSON object; the capture layer requires at least
/// `resolution` (`"WIDTHxHEIGHT"`) and `framerate` keys, extra keys pass
/// through untouched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CameraConfig {
    pub id: DbId,
    /// External camera identifier, unique per camera (device index as text).
    pub camera_id: String,
    pub name: String,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub last_updated: Timestamp,
}

/// DTO for creating a new camera configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCameraConfig {
    pub camera_id: String,
    pub name: String,
    pub settings: serde_json::Value,
}

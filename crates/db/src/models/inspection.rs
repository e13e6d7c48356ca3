//! Inspection entity models and DTOs.

use antemortem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub inspector_id: String,
    pub animal_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new inspection.
///
/// Status and timestamp are set server-side; a new inspection always
/// starts as `in_progress`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInspection {
    pub inspector_id: String,
    pub animal_id: String,
    pub notes: Option<String>,
}

/// DTO for updating an existing inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInspection {
    pub status: Option<String>,
    pub notes: Option<String>,
}

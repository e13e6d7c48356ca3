//! Handlers for the `/api/detection` resource: frame processing through the
//! pipeline plus verification and deletion of stored detections.

use antemortem_core::detection::DetectionSettings;
use antemortem_core::types::DbId;
use antemortem_db::models::detection::{Detection, UpdateDetectionVerification};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessQuery {
    pub inspection_id: DbId,
}

/// POST /api/detection/process?inspection_id=
///
/// Multipart form: a required `file` part with the frame to analyze and an
/// optional `settings` part carrying a detection-settings JSON document
/// (missing fields fall back to defaults).
pub async fn process(
    State(state): State<AppState>,
    Query(query): Query<ProcessQuery>,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<Detection>>> {
    let mut file: Option<Vec<u8>> = None;
    let mut settings = DetectionSettings::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read file part: {e}")))?;
                file = Some(bytes.to_vec());
            }
            Some("settings") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("failed to read settings part: {e}"))
                })?;
                settings = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("invalid settings JSON: {e}")))?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("missing file part".to_string()))?;
    let detections = state
        .pipeline
        .process(query.inspection_id, file, &settings)
        .await?;
    Ok(Json(detections))
}

/// GET /api/detection/inspection/{inspection_id}
pub async fn list_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<Vec<Detection>>> {
    let detections = state.pipeline.list_for_inspection(inspection_id).await?;
    Ok(Json(detections))
}

/// PUT /api/detection/{id}
///
/// Sets the verification state; clearing `verified` also clears the
/// verifier.
pub async fn verify(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDetectionVerification>,
) -> AppResult<Json<Detection>> {
    let detection = state
        .pipeline
        .verify(id, input.verified, input.verified_by.as_deref())
        .await?;
    Ok(Json(detection))
}

/// DELETE /api/detection/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.pipeline.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/api/image` resource: captured-frame metadata attached
//! to inspections.

use antemortem_core::error::CoreError;
use antemortem_core::types::DbId;
use antemortem_db::models::image::{CreateImage, Image};
use antemortem_db::repositories::{ImageRepo, InspectionRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/image/
///
/// The referenced inspection must exist (and not be deleted).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateImage>,
) -> AppResult<Json<Image>> {
    InspectionRepo::find_by_id(&state.pool, input.inspection_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Inspection",
            id: input.inspection_id,
        })?;
    let image = ImageRepo::create(&state.pool, &input).await?;
    Ok(Json(image))
}

/// GET /api/image/inspection/{inspection_id}
pub async fn list_by_inspection(
    State(state): State<AppState>,
    Path(inspection_id): Path<DbId>,
) -> AppResult<Json<Vec<Image>>> {
    let images = ImageRepo::list_by_inspection(&state.pool, inspection_id).await?;
    Ok(Json(images))
}

/// DELETE /api/image/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ImageRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity: "Image", id }.into())
    }
}

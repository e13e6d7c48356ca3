//! Handlers for the `/api/inspection` resource: session CRUD plus the PDF
//! report endpoints backed by the record store.

use std::path::PathBuf;

use antemortem_core::error::CoreError;
use antemortem_core::inspection::validate_status;
use antemortem_core::types::DbId;
use antemortem_db::models::inspection::{CreateInspection, Inspection, UpdateInspection};
use antemortem_db::repositories::InspectionRepo;
use antemortem_report::InspectionRecord;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Pagination query parameters, `?skip=&limit=` (defaults 0 / 10).
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /api/inspection/
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInspection>,
) -> AppResult<Json<Inspection>> {
    let inspection = InspectionRepo::create(&state.pool, &input).await?;
    Ok(Json(inspection))
}

/// GET /api/inspection/
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Inspection>>> {
    let inspections = InspectionRepo::list(
        &state.pool,
        antemortem_db::clamp_offset(query.skip),
        antemortem_db::clamp_limit(query.limit),
    )
    .await?;
    Ok(Json(inspections))
}

/// GET /api/inspection/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Inspection>> {
    let inspection = InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Inspection",
            id,
        })?;
    Ok(Json(inspection))
}

/// PUT /api/inspection/{id}
///
/// Partial update: only fields present in the body are applied. A status
/// outside the allowed set is rejected before touching the database.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInspection>,
) -> AppResult<Json<Inspection>> {
    if let Some(status) = input.status.as_deref() {
        validate_status(status)?;
    }
    let inspection = InspectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Inspection",
            id,
        })?;
    Ok(Json(inspection))
}

/// DELETE /api/inspection/{id}
///
/// Soft delete: the inspection disappears from reads but its detections
/// and images keep their rows.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if InspectionRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Inspection",
            id,
        }
        .into())
    }
}

/// GET /api/inspection/report/{id}
///
/// Generates the single-inspection PDF from the stored record and streams
/// it back.
pub async fn report(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let path = state.reports.inspection_report(&id.to_string()).await?;
    serve_pdf(path).await
}

/// GET /api/inspection/monthly-report/{year}/{month}
pub async fn monthly_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Response> {
    let path = state.reports.monthly_report(year, month).await?;
    serve_pdf(path).await
}

/// POST /api/inspection/records
///
/// Archives a finished inspection as a JSON record in the report store, so
/// report generation can run server-side.
pub async fn save_record(
    State(state): State<AppState>,
    Json(record): Json<InspectionRecord>,
) -> AppResult<Json<serde_json::Value>> {
    let path = state.reports.store().save(&record).await?;
    Ok(Json(json!({ "path": path.display().to_string() })))
}

/// Stream a generated PDF with download headers.
async fn serve_pdf(path: PathBuf) -> AppResult<Response> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to read generated report: {e}")))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report.pdf")
        .to_string();
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

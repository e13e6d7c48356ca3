use antemortem_capture::CaptureError;
use antemortem_core::error::CoreError;
use antemortem_pipeline::PipelineError;
use antemortem_report::ReportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error enums from the collaborator crates and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// `{ "error": msg, "code": CODE }` JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `antemortem_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A camera capture error.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// A detection pipeline error.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A report generation error.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// A resource addressed by a non-numeric key was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Capture errors ---
            AppError::Capture(err) => match err {
                CaptureError::InvalidSettings(msg) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SETTINGS",
                    format!("Invalid camera settings: {msg}"),
                ),
                CaptureError::NotActive(camera_id) => (
                    StatusCode::BAD_REQUEST,
                    "CAMERA_NOT_ACTIVE",
                    format!("Camera not active: {camera_id}"),
                ),
                CaptureError::Timeout => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "CAPTURE_TIMEOUT",
                    "Frame capture timed out".to_string(),
                ),
                CaptureError::Failure(msg) => {
                    tracing::error!(error = %msg, "Frame capture failed");
                    internal_error()
                }
            },

            // --- Pipeline errors ---
            AppError::Pipeline(err) => match err {
                PipelineError::InspectionNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Inspection with id {id} not found"),
                ),
                PipelineError::DetectionNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Detection with id {id} not found"),
                ),
                PipelineError::InvalidImage(msg) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_IMAGE",
                    format!("Invalid image data: {msg}"),
                ),
                PipelineError::Database(db_err) => classify_sqlx_error(db_err),
                PipelineError::Detector(e) => {
                    tracing::error!(error = %e, "Detector failure");
                    internal_error()
                }
                PipelineError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal pipeline error");
                    internal_error()
                }
            },

            // --- Report errors ---
            AppError::Report(err) => match err {
                ReportError::RecordNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Inspection record not found: {id}"),
                ),
                ReportError::InvalidMonth(month) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_MONTH",
                    format!("Invalid month: {month}"),
                ),
                ReportError::InvalidRecord(msg) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_RECORD",
                    msg.clone(),
                ),
                other => {
                    tracing::error!(error = %other, "Report generation failed");
                    internal_error()
                }
            },

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // SQLite reports unique violations in the message; the sqlite
            // driver does not expose constraint names.
            if db_err.message().contains("UNIQUE constraint failed") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Duplicate value violates a unique constraint".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use antemortem_api::error::AppError;
use antemortem_capture::CaptureError;
use antemortem_core::error::CoreError;
use antemortem_pipeline::PipelineError;
use antemortem_report::ReportError;
use assert_matches::assert_matches;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: domain errors convert into AppError via From
// ---------------------------------------------------------------------------

#[test]
fn domain_errors_convert_into_app_error() {
    let err: AppError = CaptureError::Timeout.into();
    assert_matches!(err, AppError::Capture(CaptureError::Timeout));

    let err: AppError = ReportError::InvalidMonth(0).into();
    assert_matches!(err, AppError::Report(ReportError::InvalidMonth(0)));

    let err: AppError = PipelineError::InspectionNotFound(5).into();
    assert_matches!(err, AppError::Pipeline(PipelineError::InspectionNotFound(5)));
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Inspection",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Inspection with id 42 not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("invalid status 'finished'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "invalid status 'finished'");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Conflict maps to 409 with CONFLICT code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate camera_id".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "duplicate camera_id");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("missing file part".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "missing file part");
}

// ---------------------------------------------------------------------------
// Test: AppError::NotFound maps to 404 for string-keyed resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn string_keyed_not_found_returns_404() {
    let err = AppError::NotFound("Camera 7 not found".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Camera 7 not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Internal maps to 500 and sanitizes like InternalError
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Internal("panic stack trace here".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("panic stack trace"),
        "Core internal error must not leak details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: CaptureError variants map to their HTTP equivalents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_settings_error_returns_400() {
    let err = AppError::Capture(CaptureError::InvalidSettings("missing 'resolution'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_SETTINGS");
}

#[tokio::test]
async fn camera_not_active_error_returns_400() {
    let err = AppError::Capture(CaptureError::NotActive("3".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CAMERA_NOT_ACTIVE");
}

#[tokio::test]
async fn capture_timeout_returns_504() {
    let err = AppError::Capture(CaptureError::Timeout);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["code"], "CAPTURE_TIMEOUT");
}

#[tokio::test]
async fn capture_failure_returns_500_and_sanitizes() {
    let err = AppError::Capture(CaptureError::Failure("/dev/video0 ioctl failed".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("/dev/video0"));
}

// ---------------------------------------------------------------------------
// Test: PipelineError variants map to their HTTP equivalents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_inspection_not_found_returns_404() {
    let err = AppError::Pipeline(PipelineError::InspectionNotFound(9));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Inspection with id 9 not found");
}

#[tokio::test]
async fn pipeline_invalid_image_returns_400() {
    let err = AppError::Pipeline(PipelineError::InvalidImage("unsupported format".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_IMAGE");
}

// ---------------------------------------------------------------------------
// Test: ReportError variants map to their HTTP equivalents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_record_not_found_returns_404() {
    let err = AppError::Report(ReportError::RecordNotFound("17".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn report_invalid_month_returns_400() {
    let err = AppError::Report(ReportError::InvalidMonth(13));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_MONTH");
    assert_eq!(json["error"], "Invalid month: 13");
}

#[tokio::test]
async fn report_render_failure_returns_500_and_sanitizes() {
    let err = AppError::Report(ReportError::Render("font table corrupt".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("font table"));
}

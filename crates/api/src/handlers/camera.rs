//! Handlers for the `/api/camera` resource: stored configuration CRUD. The
//! live frame stream lives in [`crate::ws::stream`].

use antemortem_capture::CaptureSettings;
use antemortem_db::models::camera_config::{CameraConfig, CreateCameraConfig};
use antemortem_db::repositories::CameraConfigRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Configuration payload for a camera.
#[derive(Debug, Deserialize)]
pub struct ConfigureRequest {
    /// `"WIDTHxHEIGHT"`, e.g. `"1280x720"`.
    pub resolution: String,
    /// Frames per second for streaming.
    pub framerate: u32,
    /// Additional device settings stored alongside the required fields.
    #[serde(default)]
    pub settings: serde_json::Value,
}

/// GET /api/camera/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CameraConfig>>> {
    let configs = CameraConfigRepo::list_active(&state.pool).await?;
    Ok(Json(configs))
}

/// POST /api/camera/configure/{camera_id}
///
/// Upsert: replaces the settings of an existing configuration (re-activating
/// it if it was removed) or inserts a new one. Settings are validated before
/// anything is stored so a camera can never be configured into an
/// unstreamable state.
pub async fn configure(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Json(input): Json<ConfigureRequest>,
) -> AppResult<Json<CameraConfig>> {
    let mut settings = serde_json::Map::new();
    if let serde_json::Value::Object(extra) = input.settings {
        settings.extend(extra);
    }
    settings.insert("resolution".to_string(), json!(input.resolution));
    settings.insert("framerate".to_string(), json!(input.framerate));
    let settings = serde_json::Value::Object(settings);

    CaptureSettings::parse(&settings)?;

    let config = match CameraConfigRepo::update_settings(&state.pool, &camera_id, &settings).await?
    {
        Some(config) => config,
        None => {
            let input = CreateCameraConfig {
                camera_id: camera_id.clone(),
                name: format!("Camera {camera_id}"),
                settings,
            };
            CameraConfigRepo::create(&state.pool, &input).await?
        }
    };

    tracing::info!(camera_id = %config.camera_id, "Camera configured");
    Ok(Json(config))
}

/// DELETE /api/camera/{camera_id}
///
/// Deactivates the stored configuration and stops any live capture session
/// for the camera.
pub async fn remove(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
) -> AppResult<StatusCode> {
    if CameraConfigRepo::deactivate(&state.pool, &camera_id).await? {
        state.camera_manager.stop(&camera_id).await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Camera {camera_id} not found"
        )))
    }
}

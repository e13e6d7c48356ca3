use std::sync::Arc;

use antemortem_capture::CameraManager;
use antemortem_pipeline::DetectionPipeline;
use antemortem_report::ReportService;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: antemortem_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Live camera capture sessions.
    pub camera_manager: Arc<CameraManager>,
    /// Lesion detection pipeline.
    pub pipeline: Arc<DetectionPipeline>,
    /// PDF report generation over the inspection record store.
    pub reports: Arc<ReportService>,
}

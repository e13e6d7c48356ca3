pub mod camera;
pub mod detection;
pub mod health;
pub mod image;
pub mod inspection;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /inspection/                              create, list
/// /inspection/{id}                          get, update, soft-delete
/// /inspection/records                       archive a record for reporting
/// /inspection/report/{id}                   single-inspection PDF
/// /inspection/monthly-report/{year}/{month} monthly summary PDF
///
/// /detection/process                        run detection over an upload
/// /detection/inspection/{id}                list detections
/// /detection/{id}                           verify, delete
///
/// /image/                                   create
/// /image/inspection/{id}                    list
/// /image/{id}                               soft-delete
///
/// /camera/list                              active camera configs
/// /camera/configure/{camera_id}             upsert config
/// /camera/stream/{camera_id}                WebSocket JPEG stream
/// /camera/{camera_id}                       deactivate config
/// ```
///
/// The broadcast WebSocket (`/ws`), the root banner, and `/health` are
/// mounted at root level in `main.rs`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/inspection", inspection::router())
        .nest("/detection", detection::router())
        .nest("/image", image::router())
        .nest("/camera", camera::router())
}

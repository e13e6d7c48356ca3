use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::camera;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/api/camera`.
///
/// ```text
/// GET    /list                   -> list active configurations
/// POST   /configure/{camera_id}  -> configure (upsert)
/// GET    /stream/{camera_id}     -> WebSocket JPEG frame stream
/// DELETE /{camera_id}            -> remove (deactivate)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(camera::list))
        .route("/configure/{camera_id}", post(camera::configure))
        .route("/stream/{camera_id}", get(ws::stream::camera_stream_handler))
        .route("/{camera_id}", delete(camera::remove))
}

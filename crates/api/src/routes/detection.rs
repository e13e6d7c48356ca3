use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::detection;
use crate::state::AppState;

/// Routes mounted at `/api/detection`.
///
/// ```text
/// POST   /process?inspection_id=   -> process (multipart frame upload)
/// GET    /inspection/{id}          -> list_by_inspection
/// PUT    /{id}                     -> verify
/// DELETE /{id}                     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(detection::process))
        .route(
            "/inspection/{inspection_id}",
            get(detection::list_by_inspection),
        )
        .route("/{id}", put(detection::verify).delete(detection::delete))
}

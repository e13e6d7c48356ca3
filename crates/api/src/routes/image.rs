use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/api/image`.
///
/// ```text
/// POST   /                  -> create
/// GET    /inspection/{id}   -> list_by_inspection
/// DELETE /{id}              -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(image::create))
        .route("/inspection/{inspection_id}", get(image::list_by_inspection))
        .route("/{id}", delete(image::delete))
}

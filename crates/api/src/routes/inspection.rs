use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inspection;
use crate::state::AppState;

/// Routes mounted at `/api/inspection`.
///
/// ```text
/// POST   /                              -> create
/// GET    /                              -> list (?skip=&limit=)
/// POST   /records                       -> save_record
/// GET    /report/{id}                   -> report (PDF)
/// GET    /monthly-report/{year}/{month} -> monthly_report (PDF)
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(inspection::create).get(inspection::list))
        .route("/records", post(inspection::save_record))
        .route("/report/{id}", get(inspection::report))
        .route(
            "/monthly-report/{year}/{month}",
            get(inspection::monthly_report),
        )
        .route(
            "/{id}",
            get(inspection::get_by_id)
                .put(inspection::update)
                .delete(inspection::delete),
        )
}

//! Route definitions for colleges.

use axum::routing::get;
use axum::Router;

use crate::handlers::college;
use crate::state::AppState;

/// Routes mounted at `/colleges`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(college::list).post(college::create))
        .route(
            "/{id}",
            get(college::get_by_id)
                .put(college::update)
                .delete(college::delete),
        )
}

//! Route definitions for students and the photo workflow.
//!
//! Literal sub-paths (`/programs/...`, `/upload-photo`, `/photo`) are
//! registered before the `/{id}` catch-all so formatted student IDs never
//! shadow them.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{photo, student};
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /programs/{college_id}   -> programs_by_college
/// POST   /upload-photo            -> photo upload (multipart)
/// DELETE /photo                   -> remove stored photo by path
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(student::list).post(student::create))
        .route("/programs/{college_id}", get(student::programs_by_college))
        .route("/upload-photo", post(photo::upload))
        .route("/photo", delete(photo::delete))
        .route(
            "/{id}",
            get(student::get_by_id)
                .put(student::update)
                .delete(student::delete),
        )
}

pub mod auth;
pub mod college;
pub mod health;
pub mod program;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
///
/// /colleges                        list, create
/// /colleges/{id}                   get, update, delete
///
/// /programs                        list, create
/// /programs/{id}                   get, update, delete
///
/// /students                        list, create
/// /students/{id}                   get, update, delete
/// /students/programs/{college_id}  programs scoped to a college
/// /students/upload-photo           upload photo (multipart POST)
/// /students/photo                  remove stored photo (DELETE)
/// ```
///
/// Everything except `/auth/login` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/colleges", college::router())
        .nest("/programs", program::router())
        .nest("/students", student::router())
}

//! Handlers for the photo half of the two-phase attachment workflow.
//!
//! Upload and delete are entity-independent: the client writes the student
//! first, uploads here, then attaches the returned path via a second student
//! update. A failed attach triggers `DELETE /students/photo` as the
//! compensating action.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use regis_core::error::CoreError;
use regis_core::photo::validate_photo_file;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
    pub public_url: String,
}

/// POST /api/students/upload-photo (multipart, field `file`)
///
/// Validates MIME type and size before anything touches disk.
pub async fn upload(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let mime = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        validate_photo_file(&mime, bytes.len())
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let stored = state.photos.store(&bytes, &mime).await?;
        tracing::info!(path = %stored.path, size = bytes.len(), "Photo stored");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                path: stored.path,
                public_url: stored.public_url,
            }),
        ));
    }

    Err(AppError::Core(CoreError::Validation(
        "No file provided.".into(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct DeletePhotoInput {
    pub path: String,
}

/// DELETE /api/students/photo
///
/// Removes a stored object by path. Used as the compensating delete when a
/// photo attach fails, and when replacing an existing photo.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeletePhotoInput>,
) -> AppResult<StatusCode> {
    let removed = state.photos.remove(&input.path).await?;
    if removed {
        tracing::info!(path = %input.path, "Photo removed");
    }
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/colleges` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use regis_core::error::CoreError;
use regis_core::types::DbId;
use regis_core::validation::require_trimmed;
use regis_db::models::college::{College, CreateCollege, UpdateCollege};
use regis_db::repositories::CollegeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListQuery;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/colleges
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (rows, meta) = CollegeRepo::list(&state.pool, &query.into()).await?;
    Ok(Json(paged("colleges", &rows, &meta)))
}

/// POST /api/colleges
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCollege>,
) -> AppResult<(StatusCode, Json<College>)> {
    input.code = require_trimmed(&input.code, "College code")?;
    input.name = require_trimmed(&input.name, "College name")?;
    ensure_code_free(&state, &input.code, None).await?;

    let college = CollegeRepo::create(&state.pool, &input).await?;
    tracing::info!(college_id = college.id, code = %college.code, "College created");
    Ok((StatusCode::CREATED, Json(college)))
}

/// GET /api/colleges/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<College>> {
    let college = CollegeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "College",
            id,
        }))?;
    Ok(Json(college))
}

/// PUT /api/colleges/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCollege>,
) -> AppResult<Json<College>> {
    if let Some(code) = &input.code {
        let code = require_trimmed(code, "College code")?;
        ensure_code_free(&state, &code, Some(id)).await?;
        input.code = Some(code);
    }
    if let Some(name) = &input.name {
        input.name = Some(require_trimmed(name, "College name")?);
    }

    let college = CollegeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "College",
            id,
        }))?;
    Ok(Json(college))
}

/// DELETE /api/colleges/{id}
///
/// Dependent programs survive with a null `college_id`.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CollegeRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(college_id = id, "College deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "College",
            id,
        }))
    }
}

async fn ensure_code_free(
    state: &AppState,
    code: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if CollegeRepo::code_exists(&state.pool, code, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "College code '{code}' already exists."
        ))));
    }
    Ok(())
}

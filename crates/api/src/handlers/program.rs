//! Handlers for the `/programs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use regis_core::error::CoreError;
use regis_core::types::DbId;
use regis_core::validation::require_trimmed;
use regis_db::models::program::{CreateProgram, Program, UpdateProgram};
use regis_db::repositories::{CollegeRepo, ProgramRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListQuery;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/programs
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (rows, meta) = ProgramRepo::list(&state.pool, &query.into()).await?;
    Ok(Json(paged("programs", &rows, &meta)))
}

/// POST /api/programs
///
/// A program must be created under an existing college; orphans only arise
/// later, when their college is deleted.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateProgram>,
) -> AppResult<(StatusCode, Json<Program>)> {
    input.code = require_trimmed(&input.code, "Program code")?;
    input.name = require_trimmed(&input.name, "Program name")?;

    let college_id = input.college_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("College selection is required.".into()))
    })?;
    ensure_college_exists(&state, college_id).await?;
    ensure_code_free(&state, &input.code, None).await?;

    let program = ProgramRepo::create(&state.pool, &input).await?;
    tracing::info!(program_id = program.id, code = %program.code, "Program created");
    Ok((StatusCode::CREATED, Json(program)))
}

/// GET /api/programs/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Program>> {
    let program = ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// PUT /api/programs/{id}
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProgram>,
) -> AppResult<Json<Program>> {
    if let Some(code) = &input.code {
        let code = require_trimmed(code, "Program code")?;
        ensure_code_free(&state, &code, Some(id)).await?;
        input.code = Some(code);
    }
    if let Some(name) = &input.name {
        input.name = Some(require_trimmed(name, "Program name")?);
    }
    if let Some(college_id) = input.college_id {
        ensure_college_exists(&state, college_id).await?;
    }

    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(program))
}

/// DELETE /api/programs/{id}
///
/// Enrolled students survive with a null `program_id`.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProgramRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(program_id = id, "Program deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))
    }
}

async fn ensure_college_exists(state: &AppState, college_id: DbId) -> AppResult<()> {
    CollegeRepo::find_by_id(&state.pool, college_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("College not found.".into())))?;
    Ok(())
}

async fn ensure_code_free(
    state: &AppState,
    code: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if ProgramRepo::code_exists(&state.pool, code, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Program code '{code}' already exists."
        ))));
    }
    Ok(())
}

//! Handlers for the `/students` resource.
//!
//! Students carry the subsystem's heaviest write semantics: a client-chosen
//! formatted primary key that can itself be edited, a nullable program link
//! with explicit detach, and a photo column driven by the two-phase upload
//! workflow (empty string = removal sentinel).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use regis_core::error::CoreError;
use regis_core::types::DbId;
use regis_core::validation::{require_trimmed, validate_student_id, validate_year_level, Gender};
use regis_db::models::program::Program;
use regis_db::models::student::{CreateStudent, Student, UpdateStudent};
use regis_db::repositories::{ProgramRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListQuery;
use crate::response::paged;
use crate::state::AppState;

/// GET /api/students
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (rows, meta) = StudentRepo::list(&state.pool, &query.into()).await?;
    Ok(Json(paged("students", &rows, &meta)))
}

/// POST /api/students
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    input.id = input.id.trim().to_string();
    validate_student_id(&input.id)?;
    ensure_id_free(&state, &input.id, None).await?;

    input.first_name = require_trimmed(&input.first_name, "First name")?;
    input.last_name = require_trimmed(&input.last_name, "Last name")?;
    validate_year_level(input.year_level)?;
    input.gender = Gender::parse(&input.gender)?.as_str().to_string();

    let program_id = input.program_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Program must be selected.".into()))
    })?;
    ensure_program_exists(&state, program_id).await?;

    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = %student.id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::StudentNotFound(id.clone())))?;
    Ok(Json(student))
}

/// PUT /api/students/{id}
///
/// The formatted ID itself may change; the new value is re-validated and
/// checked for uniqueness excluding the row being edited. An empty `photo`
/// clears the column and best-effort deletes the previously stored object.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    let current = StudentRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::StudentNotFound(id.clone())))?;

    if let Some(new_id) = &input.id {
        let new_id = new_id.trim().to_string();
        validate_student_id(&new_id)?;
        ensure_id_free(&state, &new_id, Some(&id)).await?;
        input.id = Some(new_id);
    }
    if let Some(first_name) = &input.first_name {
        input.first_name = Some(require_trimmed(first_name, "First name")?);
    }
    if let Some(last_name) = &input.last_name {
        input.last_name = Some(require_trimmed(last_name, "Last name")?);
    }
    if let Some(year_level) = input.year_level {
        validate_year_level(year_level)?;
    }
    if let Some(gender) = &input.gender {
        input.gender = Some(Gender::parse(gender)?.as_str().to_string());
    }
    if let Some(Some(program_id)) = input.program_id {
        ensure_program_exists(&state, program_id).await?;
    }

    // Removal sentinel: remember the object to delete once the row no longer
    // references it.
    let removed_photo = match (&input.photo, &current.photo) {
        (Some(p), Some(old)) if p.is_empty() => Some(old.clone()),
        _ => None,
    };

    let student = StudentRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::StudentNotFound(id.clone())))?;

    if let Some(old_path) = removed_photo {
        state.photos.remove_quietly(&old_path).await;
    }

    Ok(Json(student))
}

/// DELETE /api/students/{id}
///
/// The stored photo object, if any, is removed best-effort after the row.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let current = StudentRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::StudentNotFound(id.clone())))?;

    let deleted = StudentRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::StudentNotFound(id)));
    }

    if let Some(photo) = &current.photo {
        state.photos.remove_quietly(photo).await;
    }

    tracing::info!(student_id = %id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/students/programs/{college_id}
///
/// Unpaginated scoped lookup feeding the cascading form's program dropdown.
pub async fn programs_by_college(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(college_id): Path<DbId>,
) -> AppResult<Json<Vec<Program>>> {
    let programs = ProgramRepo::list_by_college(&state.pool, college_id).await?;
    Ok(Json(programs))
}

async fn ensure_program_exists(state: &AppState, program_id: DbId) -> AppResult<()> {
    ProgramRepo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Program not found.".into())))?;
    Ok(())
}

async fn ensure_id_free(state: &AppState, id: &str, exclude_id: Option<&str>) -> AppResult<()> {
    if StudentRepo::id_exists(&state.pool, id, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Student ID '{id}' already exists."
        ))));
    }
    Ok(())
}

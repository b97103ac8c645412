//! Repository for the `programs` table.

use regis_core::listing::PageMeta;
use regis_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListParams, ListSpec};
use crate::models::program::{CreateProgram, Program, ProgramListRow, UpdateProgram};

const COLUMNS: &str = "id, college_id, code, name";

/// Listing protocol spec for programs, joined with colleges for display and
/// college-scoped search/sort.
const LIST_SPEC: ListSpec = ListSpec {
    from: "programs p LEFT JOIN colleges c ON p.college_id = c.id",
    select: "p.id, p.college_id, p.code, p.name, \
             COALESCE(c.name, 'Not Applicable') AS college_name, \
             c.code AS college_code",
    search_columns: &[
        ("all", &["p.code", "p.name", "c.code"]),
        ("code", &["p.code"]),
        ("name", &["p.name"]),
        ("college", &["c.code"]),
    ],
    sort_columns: &[
        ("code", "p.code"),
        ("name", "p.name"),
        // Orphaned programs sort as an empty college code.
        ("college", "COALESCE(c.code, '')"),
    ],
    default_order: "p.id ASC",
};

/// Provides CRUD, listing, and scoped-lookup operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (college_id, code, name) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(input.college_id)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List programs as a paginated page of joined display rows.
    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<(Vec<ProgramListRow>, PageMeta), sqlx::Error> {
        let canonical = LIST_SPEC.canonicalize(params);
        fetch_page(pool, &LIST_SPEC, &canonical).await
    }

    /// Find a program by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Programs belonging to one college, for the cascading form's scoped
    /// child-option fetch. Unpaginated by design: a college's program set is
    /// small.
    pub async fn list_by_college(
        pool: &PgPool,
        college_id: DbId,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM programs WHERE college_id = $1 ORDER BY name ASC");
        sqlx::query_as::<_, Program>(&query)
            .bind(college_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive duplicate-code check across all programs,
    /// independent of college.
    pub async fn code_exists(
        pool: &PgPool,
        code: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM programs
                 WHERE UPPER(code) = UPPER($1) AND ($2::BIGINT IS NULL OR id != $2)
             )",
        )
        .bind(code.trim())
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Update a program. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                college_id = COALESCE($2, college_id),
                code = COALESCE($3, code),
                name = COALESCE($4, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(input.college_id)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a program by ID. Enrolled students keep their rows with
    /// `program_id` set to NULL. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `colleges` table.

use regis_core::listing::PageMeta;
use regis_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListParams, ListSpec};
use crate::models::college::{College, CreateCollege, UpdateCollege};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name";

/// Listing protocol spec for colleges.
const LIST_SPEC: ListSpec = ListSpec {
    from: "colleges",
    select: COLUMNS,
    search_columns: &[
        ("all", &["code", "name"]),
        ("code", &["code"]),
        ("name", &["name"]),
    ],
    sort_columns: &[("code", "code"), ("name", "name")],
    default_order: "id ASC",
};

/// Provides CRUD and listing operations for colleges.
pub struct CollegeRepo;

impl CollegeRepo {
    /// Insert a new college, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCollege) -> Result<College, sqlx::Error> {
        let query = format!(
            "INSERT INTO colleges (code, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, College>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List colleges as a paginated, searchable, sortable page.
    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<(Vec<College>, PageMeta), sqlx::Error> {
        let canonical = LIST_SPEC.canonicalize(params);
        fetch_page(pool, &LIST_SPEC, &canonical).await
    }

    /// Find a college by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<College>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM colleges WHERE id = $1");
        sqlx::query_as::<_, College>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive duplicate-code check. `exclude_id` exempts the row
    /// being edited.
    pub async fn code_exists(
        pool: &PgPool,
        code: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM colleges
                 WHERE UPPER(code) = UPPER($1) AND ($2::BIGINT IS NULL OR id != $2)
             )",
        )
        .bind(code.trim())
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Update a college. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCollege,
    ) -> Result<Option<College>, sqlx::Error> {
        let query = format!(
            "UPDATE colleges SET
                code = COALESCE($2, code),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, College>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a college by ID. Dependent programs keep their rows with
    /// `college_id` set to NULL (ON DELETE SET NULL). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM colleges WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `students` table.

use regis_core::listing::PageMeta;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListParams, ListSpec};
use crate::models::student::{CreateStudent, Student, StudentListRow, UpdateStudent};

const COLUMNS: &str = "id, first_name, last_name, program_id, year_level, gender, photo";

/// Listing protocol spec for students, joined with programs for display.
const LIST_SPEC: ListSpec = ListSpec {
    from: "students s LEFT JOIN programs p ON s.program_id = p.id",
    select: "s.id, s.first_name, s.last_name, s.program_id, s.year_level, \
             s.gender, s.photo, p.name AS program_name, p.code AS program_code",
    search_columns: &[
        (
            "all",
            &["s.id", "s.first_name", "s.last_name", "p.name", "s.gender"],
        ),
        ("id", &["s.id"]),
        ("name", &["s.first_name", "s.last_name"]),
        ("program", &["p.name"]),
        ("gender", &["s.gender"]),
    ],
    sort_columns: &[
        ("id", "s.id"),
        ("first_name", "s.first_name"),
        ("last_name", "s.last_name"),
        // Students without a program sort as an empty program name.
        ("program", "COALESCE(p.name, '')"),
        ("year_level", "s.year_level"),
        ("gender", "s.gender"),
    ],
    default_order: "s.id ASC",
};

/// Provides CRUD and listing operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row. Photos are never set
    /// at creation time; attachment is a separate update (two-phase
    /// workflow).
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (id, first_name, last_name, program_id, year_level, gender)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.program_id)
            .bind(input.year_level)
            .bind(&input.gender)
            .fetch_one(pool)
            .await
    }

    /// List students as a paginated page of joined display rows.
    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<(Vec<StudentListRow>, PageMeta), sqlx::Error> {
        let canonical = LIST_SPEC.canonicalize(params);
        fetch_page(pool, &LIST_SPEC, &canonical).await
    }

    /// Find a student by formatted ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Duplicate-ID check for create and for edits that change the primary
    /// key. `exclude_id` exempts the row being edited.
    pub async fn id_exists(
        pool: &PgPool,
        id: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM students
                 WHERE id = $1 AND ($2::VARCHAR IS NULL OR id != $2)
             )",
        )
        .bind(id.trim())
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Update a student. Only present fields in `input` are applied; a
    /// present `program_id` of `None` detaches the student from its program,
    /// and an empty `photo` clears the photo column (removal sentinel).
    ///
    /// The primary key itself may change (`input.id`); callers validate the
    /// new ID's format and uniqueness first.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                id = COALESCE($2, id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                program_id = CASE WHEN $5 THEN $6 ELSE program_id END,
                year_level = COALESCE($7, year_level),
                gender = COALESCE($8, gender),
                photo = CASE WHEN $9
                             THEN NULLIF($10, '')
                             ELSE photo END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.program_id.is_some())
            .bind(input.program_id.flatten())
            .bind(input.year_level)
            .bind(&input.gender)
            .bind(input.photo.is_some())
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }

    /// Attach or clear the photo path in one targeted update. Returns `None`
    /// if the student does not exist.
    pub async fn set_photo(
        pool: &PgPool,
        id: &str,
        photo: Option<&str>,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query =
            format!("UPDATE students SET photo = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(photo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

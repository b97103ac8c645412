use regis_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bare row from the `programs` table.
///
/// `college_id` is nullable: a program survives its college's deletion and
/// becomes orphaned ("not associated with any college").
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Program {
    pub id: DbId,
    pub college_id: Option<DbId>,
    /// Short code, unique case-insensitively across all programs,
    /// independent of college.
    pub code: String,
    pub name: String,
}

/// A program list row joined with its college for display.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProgramListRow {
    pub id: DbId,
    pub college_id: Option<DbId>,
    pub code: String,
    pub name: String,
    /// College display name; `"Not Applicable"` for orphaned programs.
    pub college_name: Option<String>,
    pub college_code: Option<String>,
}

/// DTO for creating a program. `college_id` is required at the handler level
/// ("College selection is required.").
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgram {
    pub college_id: Option<DbId>,
    pub code: String,
    pub name: String,
}

/// DTO for updating a program. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgram {
    pub college_id: Option<DbId>,
    pub code: Option<String>,
    pub name: Option<String>,
}

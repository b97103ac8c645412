use regis_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `colleges` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct College {
    pub id: DbId,
    /// Short code, unique case-insensitively (e.g. `CCS`).
    pub code: String,
    pub name: String,
}

/// DTO for creating a college.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollege {
    pub code: String,
    pub name: String,
}

/// DTO for updating a college. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCollege {
    pub code: Option<String>,
    pub name: Option<String>,
}

use regis_core::types::{DbId, StudentId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bare row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    /// Formatted `NNNN-NNNN` identifier, also the primary key.
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program_id: Option<DbId>,
    pub year_level: i32,
    pub gender: String,
    /// Storage path of the photo object; `None` when no photo is attached.
    pub photo: Option<String>,
}

/// A student list row joined with its program for display.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StudentListRow {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub program_id: Option<DbId>,
    pub year_level: i32,
    pub gender: String,
    pub photo: Option<String>,
    /// Denormalized for display and for the client's orphan-placeholder
    /// synthesis when the program is missing from its loaded collection.
    pub program_name: Option<String>,
    pub program_code: Option<String>,
}

/// DTO for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub program_id: Option<DbId>,
    pub year_level: i32,
    pub gender: String,
}

/// DTO for updating a student. Only present fields are applied.
///
/// `program_id` distinguishes "absent" (no change) from JSON `null`
/// (detach from program). `photo` accepts the empty string as the removal
/// sentinel: the column is cleared and the old stored object deleted
/// best-effort.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, with = "detachable")]
    pub program_id: Option<Option<DbId>>,
    pub year_level: Option<i32>,
    pub gender: Option<String>,
    pub photo: Option<String>,
}

/// Serde helper: `Option<Option<T>>` where absent means "no change" and
/// explicit `null` means "set to NULL".
mod detachable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

//! Wire-format entity types as the client sees them.
//!
//! These mirror the server's JSON bodies but carry no database machinery;
//! list rows include the denormalized join fields used for display and for
//! the cascading form's orphan-placeholder synthesis.

use regis_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: DbId,
    pub college_id: Option<DbId>,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub program_id: Option<DbId>,
    pub year_level: i32,
    pub gender: String,
    pub photo: Option<String>,
    /// Denormalized program fields, present on list rows.
    #[serde(default)]
    pub program_name: Option<String>,
    #[serde(default)]
    pub program_code: Option<String>,
}

/// The authenticated principal returned by login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
}

/// Create/update payload for a student. `photo` carries the storage path on
/// attach, the empty string as the removal sentinel, or is omitted entirely
/// to leave the photo untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// `Some(None)` serializes as JSON `null` (detach); absent means no
    /// change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<Option<DbId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

use regis_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. `password_hash` never serializes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

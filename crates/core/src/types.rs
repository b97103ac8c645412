/// College, program, and user primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Student primary keys are formatted strings (`NNNN-NNNN`), not integers.
pub type StudentId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

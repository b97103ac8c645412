pub mod auth;
pub mod college;
pub mod photo;
pub mod program;
pub mod student;

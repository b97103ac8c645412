//! Domain logic shared by the server and client crates.
//!
//! This crate has zero internal dependencies so both the API/repository layer
//! and the headless client can use it.

pub mod dedup;
pub mod error;
pub mod listing;
pub mod photo;
pub mod types;
pub mod validation;

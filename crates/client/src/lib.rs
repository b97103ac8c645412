//! Headless client for the student-information system.
//!
//! Implements the list-query-and-cascading-form subsystem without any UI
//! framework: the query builder, debounced search, ordered list fetching,
//! dropdown geometry and keyboard navigation, the cascading college→program
//! form controller, duplicate-key guarding, and the two-phase photo
//! workflow. Rendering is the embedder's job; everything here is state
//! machines, geometry, and HTTP.

pub mod api;
pub mod cascade;
pub mod debounce;
pub mod fetcher;
pub mod models;
pub mod photo;
pub mod positioner;
pub mod query;
pub mod session;

//! Shared response envelope types for API handlers.
//!
//! List endpoints answer with an entity-keyed envelope
//! (`{ "colleges": [...], "pagination": {...} }`) so the web client can
//! address each collection by name. Use [`paged`] instead of ad-hoc
//! `serde_json::json!` calls so the envelope shape stays consistent.

use regis_core::listing::PageMeta;
use serde::Serialize;
use serde_json::json;

/// Build the entity-keyed paginated envelope for a list response.
pub fn paged<T: Serialize>(key: &'static str, rows: &[T], meta: &PageMeta) -> serde_json::Value {
    json!({
        key: rows,
        "pagination": meta,
    })
}

/// Standard `{ "message": ... }` body for informational responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_keyed_by_entity() {
        let meta = PageMeta::compute(1, 10, 0);
        let body = paged::<i64>("colleges", &[], &meta);
        assert!(body.get("colleges").is_some());
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["total_pages"], 1);
    }
}

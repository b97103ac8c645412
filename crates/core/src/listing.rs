//! Listing canonicalization: pagination clamps, sort order, page metadata.
//!
//! Every list endpoint accepts the same five query dimensions
//! (`page`, `per_page`, `sort_by`, `order`, `search`/`search_by`). The
//! helpers here normalize raw user input so invalid values degrade to
//! defaults instead of erroring, and compute the pagination envelope the
//! client treats as authoritative.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Quiescence window for search-as-you-type, in milliseconds.
///
/// No list request may be issued until this much time has passed since the
/// most recent search-text change.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Sort direction. Serialized lowercase to match the `order` query param.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an `order` query value, degrading anything unrecognized to `Asc`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Clamp a 1-based page number to valid bounds.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a per-page size to `1..=MAX_PER_PAGE`, defaulting to
/// [`DEFAULT_PER_PAGE`].
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).max(1).min(MAX_PER_PAGE)
}

/// Normalize a `search_by` value against an allow-list, degrading to `"all"`.
pub fn normalize_search_by(raw: Option<&str>, allowed: &[&str]) -> String {
    let value = raw.unwrap_or("all").trim().to_ascii_lowercase();
    if allowed.contains(&value.as_str()) {
        value
    } else {
        "all".to_string()
    }
}

/// Pagination metadata returned alongside every page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    /// Compute the envelope from a clamped page/per_page and a total count.
    ///
    /// `total_pages` is `ceil(total / per_page)` with a floor of 1 so an
    /// empty result set still renders as "page 1 of 1".
    pub fn compute(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(page: i64, per_page: i64) -> i64 {
        (page - 1) * per_page
    }
}

//! Shared query parameter types for API handlers.

use regis_db::listing::ListParams;
use serde::Deserialize;

/// The listing protocol's query-string parameters
/// (`?page=&per_page=&sort_by=&order=&search=&search_by=`).
///
/// All fields are optional; invalid or unknown values degrade to defaults in
/// the repository layer rather than erroring.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
    pub search_by: Option<String>,
}

impl From<ListQuery> for ListParams {
    fn from(q: ListQuery) -> Self {
        ListParams {
            page: q.page,
            per_page: q.per_page,
            sort_by: q.sort_by,
            order: q.order,
            search: q.search,
            search_by: q.search_by,
        }
    }
}

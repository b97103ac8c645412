//! Generic paginated list-query builder.
//!
//! Colleges, programs, and students all answer the same listing protocol
//! (`page`, `per_page`, `sort_by`, `order`, `search`, `search_by`). Rather
//! than triplicating the WHERE/ORDER BY/LIMIT assembly per entity, each repo
//! declares a [`ListSpec`] — its FROM clause, select list, and the column
//! allow-lists behind `search_by` and `sort_by` — and the builder here
//! assembles the SQL.
//!
//! Identifier safety: every table and column fragment comes from the
//! compile-time allow-lists in the spec; only the search term itself is a
//! bound parameter.

use regis_core::listing::{
    clamp_page, clamp_per_page, normalize_search_by, PageMeta, SortOrder,
};

/// Raw listing parameters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
    pub search_by: Option<String>,
}

/// Listing parameters after clamping and allow-list normalization.
#[derive(Debug, Clone)]
pub struct CanonicalParams {
    pub page: i64,
    pub per_page: i64,
    /// Present only when the raw `sort_by` matched the spec's allow-list.
    pub sort_by: Option<String>,
    pub order: SortOrder,
    /// Present only when non-empty after trimming.
    pub search: Option<String>,
    pub search_by: String,
}

/// Per-entity description of a listable table.
pub struct ListSpec {
    /// FROM clause, including any joins (e.g. `programs p LEFT JOIN ...`).
    pub from: &'static str,
    /// Select list for page queries.
    pub select: &'static str,
    /// `search_by` value -> columns OR-ed together with ILIKE. Must contain
    /// an `"all"` entry.
    pub search_columns: &'static [(&'static str, &'static [&'static str])],
    /// `sort_by` value -> ORDER BY expression (direction appended).
    pub sort_columns: &'static [(&'static str, &'static str)],
    /// Deterministic ordering applied when no sort is requested, and as a
    /// tie-breaker suffix is not needed because every default orders by a
    /// unique key.
    pub default_order: &'static str,
}

impl ListSpec {
    /// Normalize raw parameters against this spec's allow-lists.
    pub fn canonicalize(&self, params: &ListParams) -> CanonicalParams {
        let search_by_values: Vec<&str> =
            self.search_columns.iter().map(|(k, _)| *k).collect();
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let sort_by = params
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|raw| self.sort_columns.iter().any(|(k, _)| k == raw))
            .map(str::to_string);

        CanonicalParams {
            page: clamp_page(params.page),
            per_page: clamp_per_page(params.per_page),
            sort_by,
            order: SortOrder::parse(params.order.as_deref().unwrap_or("")),
            search,
            search_by: normalize_search_by(params.search_by.as_deref(), &search_by_values),
        }
    }

    /// `WHERE (...)` fragment for the given `search_by`, with the search
    /// pattern bound at `$1`. Empty string when no search is active.
    fn where_sql(&self, params: &CanonicalParams) -> String {
        if params.search.is_none() {
            return String::new();
        }
        let columns = self
            .search_columns
            .iter()
            .find(|(k, _)| *k == params.search_by)
            .map(|(_, cols)| *cols)
            .unwrap_or(&[]);
        if columns.is_empty() {
            return String::new();
        }
        let predicates: Vec<String> =
            columns.iter().map(|c| format!("{c} ILIKE $1")).collect();
        format!("WHERE ({})", predicates.join(" OR "))
    }

    /// `ORDER BY ...` clause; falls back to the spec's default ordering.
    fn order_sql(&self, params: &CanonicalParams) -> String {
        let expr = params
            .sort_by
            .as_deref()
            .and_then(|key| self.sort_columns.iter().find(|(k, _)| *k == key))
            .map(|(_, expr)| *expr);
        match expr {
            Some(expr) => format!("ORDER BY {expr} {}", params.order.as_sql()),
            None => format!("ORDER BY {}", self.default_order),
        }
    }

    /// COUNT query for the current filter. The search pattern, if any, binds
    /// at `$1`.
    pub fn count_sql(&self, params: &CanonicalParams) -> String {
        format!("SELECT COUNT(*) FROM {} {}", self.from, self.where_sql(params))
    }

    /// Page query for the current filter/sort. Bind order: search pattern
    /// (when searching) at `$1`, then LIMIT, then OFFSET.
    pub fn page_sql(&self, params: &CanonicalParams) -> String {
        let (limit_param, offset_param) = if params.search.is_some() {
            ("$2", "$3")
        } else {
            ("$1", "$2")
        };
        format!(
            "SELECT {} FROM {} {} {} LIMIT {limit_param} OFFSET {offset_param}",
            self.select,
            self.from,
            self.where_sql(params),
            self.order_sql(params),
        )
    }
}

/// Execute the count + page queries for a spec and materialize rows of `T`.
pub async fn fetch_page<T>(
    pool: &sqlx::PgPool,
    spec: &ListSpec,
    params: &CanonicalParams,
) -> Result<(Vec<T>, PageMeta), sqlx::Error>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let pattern = params.search.as_ref().map(|s| format!("%{s}%"));
    let limit = params.per_page;
    let offset = PageMeta::offset(params.page, params.per_page);

    let count_sql = spec.count_sql(params);
    let total: i64 = match &pattern {
        Some(p) => {
            sqlx::query_scalar(&count_sql)
                .bind(p)
                .fetch_one(pool)
                .await?
        }
        None => sqlx::query_scalar(&count_sql).fetch_one(pool).await?,
    };

    let page_sql = spec.page_sql(params);
    let rows = match &pattern {
        Some(p) => {
            sqlx::query_as::<_, T>(&page_sql)
                .bind(p)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, T>(&page_sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };

    Ok((rows, PageMeta::compute(params.page, params.per_page, total)))
}

//! Query builder: turns table interactions into a canonical request
//! descriptor.
//!
//! The descriptor is a plain value; equal descriptors compare equal so a
//! caller can skip a fetch when nothing actually changed. Debouncing of the
//! search text lives in [`crate::debounce`] — the builder itself is
//! synchronous and timing-free.

use regis_core::listing::{SortOrder, DEFAULT_PER_PAGE};

/// Canonical listing request: all dimensions travel together on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub page: i64,
    pub per_page: i64,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub search: Option<String>,
    pub search_by: String,
}

impl Descriptor {
    /// Query-string pairs in the listing protocol's parameter names.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by", sort_by.clone()));
            params.push((
                "order",
                match self.order {
                    SortOrder::Asc => "asc".to_string(),
                    SortOrder::Desc => "desc".to_string(),
                },
            ));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
            params.push(("search_by", self.search_by.clone()));
        }
        params
    }
}

/// Builds descriptors from user interactions, owning the 3-state sort cycle
/// and the page-reset rules.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    search_text: String,
    search_by: String,
    /// The currently sorted field and direction; `None` when unsorted.
    sort: Option<(String, SortOrder)>,
    page: i64,
    per_page: i64,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            search_by: "all".to_string(),
            sort: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Replace the search text. Resets to page 1: a changed result set
    /// invalidates the current page position.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Replace the search-field selector (`"all"`, `"code"`, ...). Resets to
    /// page 1.
    pub fn set_search_field(&mut self, field: impl Into<String>) {
        self.search_by = field.into();
        self.page = 1;
    }

    /// Advance the 3-state sort cycle for `field`:
    /// unsorted → ascending → descending → unsorted. Clicking a different
    /// field always starts that field at ascending. Resets to page 1.
    pub fn set_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some((current, SortOrder::Asc)) if current == field => {
                Some((current, SortOrder::Desc))
            }
            Some((current, SortOrder::Desc)) if current == field => None,
            _ => Some((field.to_string(), SortOrder::Asc)),
        };
        self.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    /// Change the page size. Resets to page 1.
    pub fn set_page_size(&mut self, per_page: i64) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// Current sort state for rendering column indicators.
    pub fn sort_state(&self, field: &str) -> Option<SortOrder> {
        match &self.sort {
            Some((f, order)) if f == field => Some(*order),
            _ => None,
        }
    }

    /// Build the canonical descriptor. Pure: equal builder states produce
    /// equal descriptors.
    pub fn descriptor(&self) -> Descriptor {
        let trimmed = self.search_text.trim();
        Descriptor {
            page: self.page,
            per_page: self.per_page,
            sort_by: self.sort.as_ref().map(|(f, _)| f.clone()),
            order: self.sort.as_ref().map(|(_, o)| *o).unwrap_or_default(),
            search: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            search_by: self.search_by.clone(),
        }
    }
}

//! Paginated list fetcher with last-descriptor-wins ordering.
//!
//! Responses may resolve out of order; a monotonic sequence number issued
//! per fetch guarantees that only the newest issued descriptor's result is
//! ever applied. Failures keep the last good rows on screen unless nothing
//! was ever loaded.

use async_trait::async_trait;
use regis_core::listing::PageMeta;

use crate::api::ApiError;
use crate::query::Descriptor;

/// One page of rows plus the server's pagination envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub pagination: PageMeta,
}

/// Something that can answer a listing descriptor. Implemented by the HTTP
/// client per entity; stubbed in tests.
#[async_trait]
pub trait ListSource<T> {
    async fn fetch(&self, descriptor: &Descriptor) -> Result<ListPage<T>, ApiError>;
}

/// What an empty rows vector means, given the descriptor that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// Rows are present (or nothing loaded yet).
    NotEmpty,
    /// The dataset itself has no records.
    NoRecords,
    /// A search was active and matched nothing.
    NoMatches,
}

/// Sequence token handed out by [`ListFetcher::begin`]; only the newest
/// token's result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct ListFetcher<T> {
    issued: u64,
    pub rows: Vec<T>,
    pub pagination: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<String>,
    /// Whether any fetch ever succeeded (first-fetch failures blank the
    /// table; later failures keep last-good rows).
    loaded_once: bool,
    /// Whether the applied result came from a searching descriptor.
    last_was_search: bool,
}

impl<T> Default for ListFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListFetcher<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            rows: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            loaded_once: false,
            last_was_search: false,
        }
    }

    /// Record that a fetch for some descriptor is being issued. The returned
    /// ticket must be passed to [`apply`](Self::apply) with the result.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket(self.issued)
    }

    /// Apply a resolved fetch. Results for any ticket other than the newest
    /// are discarded (last descriptor wins). Returns whether the result was
    /// applied.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        descriptor: &Descriptor,
        result: Result<ListPage<T>, ApiError>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.issued,
                "Discarding stale list response"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.pagination = Some(page.pagination);
                self.error = None;
                self.loaded_once = true;
                self.last_was_search = descriptor.search.is_some();
            }
            Err(err) => {
                self.error = Some(err.user_message());
                if !self.loaded_once {
                    self.rows.clear();
                    self.pagination = None;
                }
                // Otherwise: keep last-good rows; no flash-to-empty.
            }
        }
        true
    }

    /// Issue and await a fetch in one step. Callers racing multiple
    /// refreshes should use [`begin`](Self::begin)/[`apply`](Self::apply)
    /// directly.
    pub async fn refresh<S: ListSource<T>>(&mut self, source: &S, descriptor: &Descriptor) {
        let ticket = self.begin();
        let result = source.fetch(descriptor).await;
        self.apply(ticket, descriptor, result);
    }

    /// Distinguish "no records exist" from "nothing matched this search".
    pub fn empty_kind(&self) -> EmptyKind {
        if !self.loaded_once || !self.rows.is_empty() {
            EmptyKind::NotEmpty
        } else if self.last_was_search {
            EmptyKind::NoMatches
        } else {
            EmptyKind::NoRecords
        }
    }
}

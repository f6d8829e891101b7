//! Listing controller: owns the applied filters and page state and turns
//! every change into a query stamped with a sequence number.
//!
//! All transitions are synchronous. Each one that changes what should be on
//! screen returns an [`IssuedQuery`]; the caller fetches it and hands the
//! outcome back through [`ListingController::apply_response`], which keeps
//! only the response to the most recently issued query.

use chrono::{DateTime, Local};

use super::catalog::{ProductPage, ProductQuery};
use super::pagination::{page_range, PageRangeItem};
use super::types::{Breakpoint, Filters, PageState, SortDirection};

/// A query together with the sequence number it was issued under
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedQuery {
    pub seq: u64,
    pub query: ProductQuery,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListingStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct ListingController {
    filters: Filters,
    page: PageState,
    breakpoint: Breakpoint,
    last_seq: u64,
    latest: Option<IssuedQuery>,
    status: ListingStatus,
    results: Option<ProductPage>,
    /// Page count for the current filters and page size; unknown until
    /// their first response lands
    known_total: Option<u32>,
    updated_at: Option<DateTime<Local>>,
}

impl Default for ListingController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingController {
    pub fn new() -> Self {
        let breakpoint = Breakpoint::Default;
        Self {
            filters: Filters::default(),
            page: PageState {
                current_page: 1,
                page_size: breakpoint.page_size(),
            },
            breakpoint,
            last_seq: 0,
            latest: None,
            status: ListingStatus::Idle,
            results: None,
            known_total: None,
            updated_at: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page.page_size
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    pub fn results(&self) -> Option<&ProductPage> {
        self.results.as_ref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListingStatus::Loading
    }

    /// Total pages for the applied filters and page size, once a response
    /// for them has landed
    pub fn total_pages(&self) -> Option<u32> {
        self.known_total
    }

    pub fn current_query(&self) -> ProductQuery {
        ProductQuery::new(&self.filters, self.page)
    }

    /// Page strip for the view. The current page is clamped into the known
    /// page count first, since a narrowed filter can leave it out of range.
    /// Empty when there is nothing to page through.
    pub fn page_strip(&self, sibling_count: u32) -> Vec<PageRangeItem> {
        match self.total_pages() {
            Some(total) if total > 1 => {
                let current = self.page.current_page.clamp(1, total);
                page_range(total, current, sibling_count)
            }
            _ => Vec::new(),
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.total_pages()
            .is_some_and(|total| self.page.current_page < total)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// First measurement after the view comes up. Always issues page 1.
    pub fn mount(&mut self, breakpoint: Breakpoint) -> IssuedQuery {
        self.breakpoint = breakpoint;
        self.page = PageState {
            current_page: 1,
            page_size: breakpoint.page_size(),
        };
        self.known_total = None;
        self.issue()
    }

    pub fn submit_search(&mut self, text: &str) -> IssuedQuery {
        let filters = Filters {
            search_text: text.trim().to_string(),
            ..self.filters.clone()
        };
        self.apply_filters(filters)
    }

    pub fn clear_search(&mut self) -> IssuedQuery {
        let filters = Filters {
            search_text: String::new(),
            ..self.filters.clone()
        };
        self.apply_filters(filters)
    }

    pub fn change_category(&mut self, category: &str) -> IssuedQuery {
        let filters = Filters {
            category: category.to_string(),
            ..self.filters.clone()
        };
        self.apply_filters(filters)
    }

    pub fn change_sort_by(&mut self, sort_field: &str) -> IssuedQuery {
        let filters = Filters {
            sort_field: sort_field.to_string(),
            ..self.filters.clone()
        };
        self.apply_filters(filters)
    }

    pub fn change_sort_order(&mut self, direction: SortDirection) -> IssuedQuery {
        let filters = Filters {
            sort_direction: direction,
            ..self.filters.clone()
        };
        self.apply_filters(filters)
    }

    /// New filters and page 1 land together, so no query ever pairs the new
    /// filters with the old page.
    fn apply_filters(&mut self, filters: Filters) -> IssuedQuery {
        tracing::debug!(?filters, "Applying filters");
        self.filters = filters;
        self.page.current_page = 1;
        self.known_total = None;
        self.issue()
    }

    /// Returns `None` when the breakpoint did not actually change.
    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) -> Option<IssuedQuery> {
        if breakpoint == self.breakpoint {
            return None;
        }
        tracing::debug!(
            from = self.breakpoint.label(),
            to = breakpoint.label(),
            page_size = breakpoint.page_size(),
            "Breakpoint changed"
        );
        self.breakpoint = breakpoint;
        self.page = PageState {
            current_page: 1,
            page_size: breakpoint.page_size(),
        };
        self.known_total = None;
        Some(self.issue())
    }

    /// Jump to `page`. Rejects page 0, pages past the known total, and the
    /// page already being shown.
    pub fn go_to_page(&mut self, page: u32) -> Option<IssuedQuery> {
        if page == 0 || page == self.page.current_page {
            return None;
        }
        if let Some(total) = self.total_pages() {
            if page > total {
                tracing::debug!(page, total, "Ignoring page past the end");
                return None;
            }
        }
        self.page.current_page = page;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<IssuedQuery> {
        if !self.has_next_page() {
            return None;
        }
        self.go_to_page(self.page.current_page + 1)
    }

    pub fn previous_page(&mut self) -> Option<IssuedQuery> {
        if !self.has_previous_page() {
            return None;
        }
        self.go_to_page(self.page.current_page - 1)
    }

    pub fn last_page(&mut self) -> Option<IssuedQuery> {
        let total = self.total_pages()?;
        self.go_to_page(total)
    }

    /// Re-issue the last query exactly as it was, under a fresh sequence number.
    pub fn retry(&mut self) -> Option<IssuedQuery> {
        let query = self.latest.as_ref()?.query.clone();
        tracing::info!(page = query.page, "Retrying last query");
        Some(self.stamp(query))
    }

    fn issue(&mut self) -> IssuedQuery {
        let query = self.current_query();
        self.stamp(query)
    }

    fn stamp(&mut self, query: ProductQuery) -> IssuedQuery {
        self.last_seq += 1;
        let issued = IssuedQuery {
            seq: self.last_seq,
            query,
        };
        self.latest = Some(issued.clone());
        self.status = ListingStatus::Loading;
        issued
    }

    /// Apply the outcome of query `seq`. Anything but the latest is dropped.
    /// Returns whether the response was applied.
    pub fn apply_response(&mut self, seq: u64, outcome: Result<ProductPage, String>) -> bool {
        let latest_seq = self.latest.as_ref().map(|q| q.seq);
        if latest_seq != Some(seq) {
            tracing::debug!(seq, ?latest_seq, "Discarding stale listing response");
            return false;
        }

        match outcome {
            Ok(page) => {
                tracing::info!(
                    seq,
                    products = page.products.len(),
                    total_pages = page.total_pages,
                    "Listing updated"
                );
                self.known_total = Some(page.total_pages);
                self.results = Some(page);
                self.status = ListingStatus::Ready;
                self.updated_at = Some(Local::now());
            }
            Err(message) => {
                tracing::warn!(seq, error = %message, "Listing fetch failed");
                self.status = ListingStatus::Failed(message);
            }
        }
        true
    }
}

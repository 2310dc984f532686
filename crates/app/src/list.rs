//! Replace-on-page-change list store.
//!
//! Holds exactly one page at a time. Every load replaces the items and the
//! pagination fields with what the server sent; a failed load records the
//! message and empties the items. There is no retry.

use taller_client::{ApiError, PagedSource};
use taller_core::{ListFilters, PageQuery};

pub struct PagedList<S: PagedSource> {
    source: S,
    filters: ListFilters,
    default_limit: u32,
    query: PageQuery,
    items: Vec<S::Item>,
    total: u64,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
}

impl<S: PagedSource> PagedList<S> {
    pub fn new(source: S, default_limit: u32) -> Self {
        let query = PageQuery::new(1, None, default_limit);
        Self {
            source,
            filters: ListFilters::default(),
            default_limit: query.limit,
            query,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            loading: false,
            error: None,
        }
    }

    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Fetch `page`. A `None` limit keeps the current one; zero falls back to
    /// the default page size.
    pub async fn load(&mut self, page: u32, limit: Option<u32>) -> Result<(), ApiError> {
        let query = PageQuery::new(page, limit.or(Some(self.query.limit)), self.default_limit);
        self.loading = true;
        self.error = None;

        let result = self.source.fetch_page(query, &self.filters).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.query = PageQuery {
                    page: page.page,
                    limit: page.limit,
                };
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.items = page.items;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(page = query.page, limit = query.limit, error = %e, "list load failed");
                self.query = query;
                self.error = Some(e.to_string());
                self.items.clear();
                Err(e)
            }
        }
    }

    /// Load the current page again with the current filters.
    pub async fn reload(&mut self) -> Result<(), ApiError> {
        self.load(self.query.page, None).await
    }

    /// Advance one page. Returns `Ok(false)` without a request on the last page.
    pub async fn next_page(&mut self) -> Result<bool, ApiError> {
        if self.query.page >= self.total_pages {
            return Ok(false);
        }
        self.load(self.query.page + 1, None).await.map(|_| true)
    }

    /// Go back one page. Returns `Ok(false)` without a request on the first page.
    pub async fn prev_page(&mut self) -> Result<bool, ApiError> {
        if self.query.page <= 1 {
            return Ok(false);
        }
        self.load(self.query.page - 1, None).await.map(|_| true)
    }

    /// Change the page size and go back to the first page.
    pub async fn set_limit(&mut self, limit: u32) -> Result<(), ApiError> {
        self.load(1, Some(limit)).await
    }

    /// Replace the filters and go back to the first page.
    pub async fn set_filters(&mut self, filters: ListFilters) -> Result<(), ApiError> {
        self.filters = filters;
        self.load(1, None).await
    }

    /// Apply a search term and go back to the first page.
    pub async fn search(&mut self, term: &str) -> Result<(), ApiError> {
        self.filters.search = Some(term.trim().to_string()).filter(|t| !t.is_empty());
        self.load(1, None).await
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn limit(&self) -> u32 {
        self.query.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

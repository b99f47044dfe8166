//! The paginated-list contract shared by the admin list endpoints.
//!
//! List endpoints take `page`, `limit` and resource-specific filters, and
//! answer `{ <rows>, totalCount, page, limit }`.

/// Page size used when none is chosen.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Page sizes offered by the list screens.
pub const PAGE_SIZES: [u32; 3] = [25, 50, 100];

/// Query parameters for a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    limit: u32,
    filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-based page. Zero is treated as 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size. Zero is treated as 1.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Adds or replaces a filter. Empty values remove the filter, so an
    /// "all statuses" selection sends nothing.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        let value = value.trim();
        self.filters.retain(|(k, _)| *k != key);
        if !value.is_empty() {
            self.filters.push((key, value.to_string()));
        }
        self
    }

    /// Filters by an optional value; `None` removes the filter.
    #[must_use]
    pub fn filter_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.filter(key, value),
            None => self.filter(key, ""),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.limit
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Renders `page=..&limit=..` followed by filters in insertion order.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("page={}", self.page), format!("limit={}", self.limit)];
        parts.extend(self.filters.iter().map(|(k, v)| {
            format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
        }));
        parts.join("&")
    }

    /// Appends the query string to `path`.
    pub fn apply_to(&self, path: &str) -> String {
        format!("{path}?{}", self.to_query_string())
    }
}

/// A page of rows returned by a list endpoint.
pub trait Paginated {
    /// Total rows across all pages.
    fn total_count(&self) -> u64;

    /// The page this payload holds.
    fn page(&self) -> u32;

    /// Page size the server applied.
    fn limit(&self) -> u32;

    /// Number of pages, never less than 1.
    fn total_pages(&self) -> u32 {
        total_pages(self.total_count(), self.limit())
    }

    fn has_next(&self) -> bool {
        self.page() < self.total_pages()
    }

    fn has_prev(&self) -> bool {
        self.page() > 1
    }
}

/// `ceil(total / limit)`, at least 1.
pub(crate) fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Caller-held paging state for one list screen.
///
/// Changing the page size or any filter returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    query: ListQuery,
    total_count: Option<u64>,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(ListQuery::default())
    }
}

impl PageCursor {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            total_count: None,
        }
    }

    /// The query for the current page.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    /// Number of pages given the last observed total. 1 until a page has
    /// been observed.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count.unwrap_or(0), self.query.limit)
    }

    /// Records the total from a fetched page.
    pub fn observe<P: Paginated + ?Sized>(&mut self, page: &P) {
        self.total_count = Some(page.total_count());
    }

    /// Moves to the next page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        if self.query.page >= self.total_pages() {
            return false;
        }
        self.query.page += 1;
        true
    }

    /// Moves to the previous page. Returns false at page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.query.page <= 1 {
            return false;
        }
        self.query.page -= 1;
        true
    }

    /// Jumps to `page`, clamped to the known page range.
    pub fn go_to(&mut self, page: u32) {
        self.query.page = page.clamp(1, self.total_pages());
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, limit: u32) {
        self.query.limit = limit.max(1);
        self.query.page = 1;
    }

    /// Changes a filter and returns to page 1.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let query = std::mem::take(&mut self.query);
        self.query = query.filter(key, value).page(1);
    }
}

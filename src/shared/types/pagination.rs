//! Offset/limit pagination shared by every listing endpoint.

/// Rows per page on every admin listing.
pub const PAGE_SIZE: u64 = 5;

/// Position of one listing request.
///
/// `current` is 1-based. `rows` is filled in once the backing store has
/// been counted, so a freshly built page reports zero rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    current: u64,
    limit: u64,
    rows: u64,
    path: String,
}

impl Page {
    pub fn new(current: u64, path: impl Into<String>) -> Self {
        Self {
            current: current.max(1),
            limit: PAGE_SIZE,
            rows: 0,
            path: path.into(),
        }
    }

    /// Lenient page-number parsing: absent, blank, zero or non-numeric
    /// values all land on the first page.
    pub fn parse_current(raw: Option<&str>) -> u64 {
        raw.and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(1)
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }

    /// Number of rows to skip before this page. Saturates for page numbers
    /// too large to address, which then lie past any real row count.
    pub fn offset(&self) -> u64 {
        (self.current - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self) -> u64 {
        self.rows.div_ceil(self.limit)
    }

    /// First page number of the pager window around `current`.
    pub fn from(&self) -> u64 {
        self.current.saturating_sub(2).max(1)
    }

    /// Last page number of the pager window around `current`.
    pub fn to(&self) -> u64 {
        self.current.saturating_add(2).min(self.total_pages())
    }
}

/// One page of records together with the page it was read for.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub page: Page,
}

impl<T> Listing<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
        }
    }
}

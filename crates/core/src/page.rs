//! Pagination primitives shared by repositories and list stores.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on rows per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page request (1-based page number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping into `page >= 1` and `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Zero-based row offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.page_size)
    }

    pub fn previous(&self) -> Self {
        Self::new(self.page.saturating_sub(1), self.page_size)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self::new(page, self.page_size)
    }
}

/// One page of results plus the total row count across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        Self {
            results,
            count,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Number of pages needed for `count` rows (0 when there are no rows).
    pub fn total_pages(&self) -> u32 {
        total_pages(self.count, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl<T: Clone> Page<T> {
    /// Slice an in-memory result set. A page past the end yields no rows but
    /// still reports the full count.
    pub fn paginate(all: &[T], request: PageRequest) -> Self {
        let start = request.offset().min(all.len());
        let end = start
            .saturating_add(request.page_size as usize)
            .min(all.len());
        Self::new(all[start..end].to_vec(), all.len() as u64, request)
    }
}

/// Number of pages needed for `count` rows of `page_size` each.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if count == 0 || page_size == 0 {
        return 0;
    }
    let pages = count.div_ceil(page_size as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

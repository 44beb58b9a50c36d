//! Paginated, filterable list state.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;

use wareflow_core::page::total_pages;
use wareflow_core::{Page, PageRequest};

use crate::error::ClientResult;

/// Where a [`ListStore`] gets its pages from (a list use case).
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Filter: Clone + Default + PartialEq + Send + Sync + 'static;

    async fn fetch(&self, filter: &Self::Filter, page: PageRequest) -> ClientResult<Page<Self::Item>>;
}

/// Everything a list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T, F> {
    pub results: Vec<T>,
    /// Total rows across all pages.
    pub count: u64,
    pub filters: F,
    pub pagination: PageRequest,
    pub loading: bool,
    pub error: Option<String>,
    /// At least one load has succeeded.
    pub loaded: bool,
}

impl<T, F: Default> ListState<T, F> {
    fn new(page_size: u32) -> Self {
        Self {
            results: Vec::new(),
            count: 0,
            filters: F::default(),
            pagination: PageRequest::first(page_size),
            loading: false,
            error: None,
            loaded: false,
        }
    }
}

impl<T, F> ListState<T, F> {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.count, self.pagination.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.pagination.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.pagination.page > 1
    }
}

/// Observable list store.
///
/// Every fetch takes a ticket; when it completes after a newer fetch has
/// started, its response is dropped so a slow, stale page never overwrites
/// the current one.
pub struct ListStore<S: ListSource> {
    source: S,
    state: watch::Sender<ListState<S::Item, S::Filter>>,
    latest: AtomicU64,
}

impl<S: ListSource> ListStore<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        let (state, _) = watch::channel(ListState::new(page_size));
        Self {
            source,
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item, S::Filter>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ListState<S::Item, S::Filter> {
        self.state.borrow().clone()
    }

    pub fn filters(&self) -> S::Filter {
        self.state.borrow().filters.clone()
    }

    pub fn pagination(&self) -> PageRequest {
        self.state.borrow().pagination
    }

    /// Fetch the current page with the current filters.
    ///
    /// Returns the number of rows received, or `None` on failure or when the
    /// response was superseded.
    pub async fn load(&self) -> Option<usize> {
        let (filters, page) = {
            let state = self.state.borrow();
            (state.filters.clone(), state.pagination)
        };
        self.fetch(filters, page, false).await
    }

    pub async fn refresh(&self) -> Option<usize> {
        self.load().await
    }

    /// Replace the filters and go back to page 1.
    pub async fn set_filters(&self, filters: S::Filter) -> Option<usize> {
        self.state.send_modify(|s| {
            s.filters = filters;
            s.pagination = s.pagination.with_page(1);
        });
        self.load().await
    }

    /// Edit the filters in place and go back to page 1.
    pub async fn update_filters(&self, edit: impl FnOnce(&mut S::Filter)) -> Option<usize> {
        let mut filters = self.filters();
        edit(&mut filters);
        self.set_filters(filters).await
    }

    pub async fn reset_filters(&self) -> Option<usize> {
        self.set_filters(S::Filter::default()).await
    }

    /// Jump to `page`, clamped to the known page range once a load has
    /// succeeded.
    pub async fn go_to_page(&self, page: u32) -> Option<usize> {
        let target = {
            let state = self.state.borrow();
            let last = state.total_pages().max(1);
            let page = if state.loaded { page.min(last) } else { page };
            state.pagination.with_page(page)
        };
        let filters = self.filters();
        self.fetch(filters, target, false).await
    }

    /// No-op on the last page.
    pub async fn next_page(&self) -> Option<usize> {
        let (has_next, next) = {
            let state = self.state.borrow();
            (state.has_next(), state.pagination.next())
        };
        if !has_next {
            return None;
        }
        self.fetch(self.filters(), next, false).await
    }

    /// No-op on page 1.
    pub async fn previous_page(&self) -> Option<usize> {
        let (has_previous, previous) = {
            let state = self.state.borrow();
            (state.has_previous(), state.pagination.previous())
        };
        if !has_previous {
            return None;
        }
        self.fetch(self.filters(), previous, false).await
    }

    /// Change the page size and go back to page 1.
    pub async fn set_page_size(&self, page_size: u32) -> Option<usize> {
        self.state
            .send_modify(|s| s.pagination = PageRequest::first(page_size));
        self.load().await
    }

    /// Append the next page to the current results (infinite scroll).
    pub async fn load_more(&self) -> Option<usize> {
        let (has_next, next) = {
            let state = self.state.borrow();
            (state.has_next(), state.pagination.next())
        };
        if !has_next {
            return None;
        }
        self.fetch(self.filters(), next, true).await
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    /// Swap in an updated row (e.g. after a status change).
    pub fn replace_where(&self, matches: impl Fn(&S::Item) -> bool, item: S::Item) {
        self.state.send_if_modified(|s| match s.results.iter_mut().find(|r| matches(r)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        });
    }

    /// Put a freshly created row at the top.
    pub fn prepend(&self, item: S::Item) {
        self.state.send_modify(|s| {
            s.results.insert(0, item);
            s.count += 1;
        });
    }

    pub fn remove_where(&self, matches: impl Fn(&S::Item) -> bool) {
        self.state.send_if_modified(|s| {
            let before = s.results.len();
            s.results.retain(|r| !matches(r));
            let removed = before - s.results.len();
            s.count = s.count.saturating_sub(removed as u64);
            removed > 0
        });
    }

    pub fn find(&self, matches: impl Fn(&S::Item) -> bool) -> Option<S::Item> {
        self.state.borrow().results.iter().find(|r| matches(r)).cloned()
    }

    async fn fetch(&self, filters: S::Filter, page: PageRequest, append: bool) -> Option<usize> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.source.fetch(&filters, page).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!(page = page.page, "dropping superseded list response");
            return None;
        }

        match result {
            Ok(fetched) => {
                let received = fetched.results.len();
                tracing::info!(page = page.page, received, count = fetched.count, "list loaded");
                self.state.send_modify(|s| {
                    if append {
                        s.results.extend(fetched.results);
                    } else {
                        s.results = fetched.results;
                    }
                    s.count = fetched.count;
                    s.filters = filters;
                    s.pagination = page;
                    s.loading = false;
                    s.loaded = true;
                });
                Some(received)
            }
            Err(err) => {
                tracing::error!(error = %err, page = page.page, "failed to load list");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(err.to_string());
                });
                None
            }
        }
    }
}

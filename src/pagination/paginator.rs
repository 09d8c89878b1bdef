//! Page loop
//!
//! ```text
//! Start ──▶ Fetching(n) ──▶ Fetching(n+1)   full page, no pinned page
//!                 │
//!                 ├──▶ Done                 empty, short or pinned page
//!                 └──▶ Failed               any fetch error
//! ```
//!
//! Pages are fetched one at a time. Items are concatenated in fetch order
//! without deduplication. A failure discards everything gathered so far.

use super::filter::Filter;
use super::types::{NextPage, PageSource, PaginationState, StopReason};
use crate::error::Result;
use crate::fetch::Page;
use crate::record::Item;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default first page
pub const FIRST_PAGE: u32 = 1;

/// Drives a [`PageSource`] from a start page until a stop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    start_page: u32,
    page_size: u32,
    single_page: bool,
}

impl Paginator {
    /// Walk every page from page one
    pub fn new(page_size: u32) -> Self {
        Self {
            start_page: FIRST_PAGE,
            page_size: page_size.max(1),
            single_page: false,
        }
    }

    /// Derive the loop from a filter: a pinned page fetches only that page
    pub fn for_filter(filter: &Filter, default_page_size: u32) -> Self {
        let page_size = filter.effective_page_size(default_page_size).max(1);
        match filter.single_page() {
            Some(page) => Self {
                start_page: page,
                page_size,
                single_page: true,
            },
            None => Self::new(page_size),
        }
    }

    /// First page requested
    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether only one page is fetched
    pub fn is_single_page(&self) -> bool {
        self.single_page
    }

    /// Decide what follows a fetched page.
    ///
    /// Uses the raw record count, so records skipped during mapping never
    /// end the loop early.
    pub fn advance(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.add_page(page.raw_count, page.skipped);

        let reason = if page.raw_count == 0 {
            Some(StopReason::EmptyPage)
        } else if page.raw_count < self.page_size as usize {
            Some(StopReason::ShortPage)
        } else if self.single_page {
            Some(StopReason::SinglePage)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                state.mark_done();
                NextPage::Done(reason)
            }
            None => {
                state.next_page();
                NextPage::Continue { page: state.page }
            }
        }
    }

    /// Fetch every page and return all items, or the first error
    pub async fn collect<S>(&self, source: &S, cancel: &CancellationToken) -> Result<Vec<Item>>
    where
        S: PageSource + ?Sized,
    {
        let mut state = PaginationState::with_page(self.start_page);
        let mut items = Vec::new();

        while !state.done {
            let page = source
                .fetch_page(state.page, self.page_size, cancel)
                .await?;

            let fetched_page = state.page;
            let next = self.advance(&page, &mut state);
            items.extend(page.items);

            debug!(
                "Fetched page {}: {} records, {} items so far",
                fetched_page,
                page.raw_count,
                items.len()
            );

            if let NextPage::Done(reason) = next {
                debug!("Pagination complete after page {fetched_page}: {reason:?}");
            }
        }

        info!(
            "Fetched {} items in {} pages ({} records skipped)",
            items.len(),
            state.pages_fetched,
            state.skipped
        );

        Ok(items)
    }
}

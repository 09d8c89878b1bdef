//! Pagination types and traits
//!
//! Defines the page source abstraction and the state carried between pages.

use crate::error::Result;
use crate::fetch::Page;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Anything that can produce a numbered page of items
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (1-based) with `page_size` records requested
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        cancel: &CancellationToken,
    ) -> Result<Page>;
}

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page next
    Continue {
        /// Page number to request
        page: u32,
    },
    /// No more pages
    Done(StopReason),
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page held no records
    EmptyPage,
    /// The page held fewer records than requested
    ShortPage,
    /// The caller asked for exactly one page
    SinglePage,
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Page currently being fetched
    pub page: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Raw records received so far, skipped ones included
    pub total_fetched: u64,
    /// Records dropped by mapping so far
    pub skipped: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Record one fetched page
    pub fn add_page(&mut self, raw_count: usize, skipped: usize) {
        self.pages_fetched += 1;
        self.total_fetched += raw_count as u64;
        self.skipped += skipped as u64;
    }
}

//! Pagination module
//!
//! Page-number pagination over the search endpoint.
//!
//! # Overview
//!
//! A [`Paginator`] asks a [`PageSource`] for pages 1, 2, 3, ... until a page
//! comes back empty or short, or stops after one page when the [`Filter`]
//! pins a page number. The source owns the HTTP details; the paginator only
//! sees page sizes and record counts.

mod filter;
mod paginator;
mod types;

pub use filter::{Filter, FilterBuilder, INSTALLED};
pub use paginator::{Paginator, FIRST_PAGE};
pub use types::{NextPage, PageSource, PaginationState, StopReason};

//! Page arithmetic against a live row count.
//!
//! Counting happens before fetching: the right offset depends on the number
//! of pages, and a request for a page past the end is pulled back to the last
//! page instead of returning an empty window.
//!
//! ```rust
//! use pager_query::Query;
//!
//! let mut query = Query::new().with_page(7, 20);
//! let info = query.paginate(&95u64).unwrap();
//!
//! assert_eq!(info.total_page, 5);
//! assert_eq!(info.current_page, 5);
//! assert_eq!(query.offset(), Some(80));
//! assert_eq!(query.limit(), Some(20));
//! ```
//!
//! # Empty results
//!
//! With no matching rows there are no pages, and the current page is clamped
//! to 0. Treat `total_page == 0` as "no results".

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{QueryError, QueryResult};
use crate::query::Query;
use crate::traits::RowCounter;

/// Number of pages needed for `rows` rows, rounding a partial page up.
///
/// `page_size` must be at least 1.
#[inline]
pub const fn total_pages(rows: u64, page_size: u64) -> u64 {
    let pages = rows / page_size;
    if rows % page_size > 0 { pages + 1 } else { pages }
}

/// Page metadata computed by [`paginate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageInfo {
    /// Rows matching the predicates.
    pub total_row: u64,
    /// Number of pages.
    pub total_page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// The page actually served after clamping.
    pub current_page: u64,
}

impl PageInfo {
    /// Attach the fetched results.
    pub fn with_results<T>(self, results: T) -> Page<T> {
        Page {
            total_row: self.total_row,
            total_page: self.total_page,
            page_size: self.page_size,
            current_page: self.current_page,
            results,
        }
    }

    /// Whether a page after the current one exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_page
    }

    /// Whether a page before the current one exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// A page of results with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows matching the predicates.
    pub total_row: u64,
    /// Number of pages.
    pub total_page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// The page served.
    pub current_page: u64,
    /// The fetched rows.
    pub results: T,
}

impl<T> Page<T> {
    /// Metadata without the results.
    pub fn info(&self) -> PageInfo {
        PageInfo {
            total_row: self.total_row,
            total_page: self.total_page,
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }

    /// Transform the results, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Page<U> {
        let info = self.info();
        info.with_results(f(self.results))
    }
}

/// Check that `query` can be paged, returning its requested page and size.
///
/// Runs before any row count so a degenerate request never reaches storage.
pub fn requested_window(query: &Query) -> QueryResult<(i64, i64)> {
    let (Some(requested), Some(size)) = (query.page, query.size) else {
        return Err(QueryError::not_paginated());
    };
    if size < 1 {
        return Err(QueryError::invalid_page_size(size));
    }
    Ok((requested, size))
}

/// Reconcile `query`'s requested page with the row count from `counter`.
///
/// Clamps the page into `1..=total_pages` (0 when there are no rows) and sets
/// the query's limit and offset for the fetch. The offset is
/// `(page - 1) * size` floored at 0, so the page-0 result of an empty table
/// gets offset 0 rather than `-size`. The counter is called exactly once; its
/// error is returned as-is. Calling this again with the same count gives the
/// same result.
///
/// Fails without counting if the query was built without pagination or its
/// page size is below 1.
pub fn paginate<C: RowCounter + ?Sized>(query: &mut Query, counter: &C) -> QueryResult<PageInfo> {
    let (requested, size) = requested_window(query)?;
    let page_size = size as u64;
    let requested = requested.max(1) as u64;

    let total_row = counter.count_rows(query)?;
    let total_page = total_pages(total_row, page_size);

    let current_page = if requested > total_page {
        warn!(requested, total_page, "requested page is past the last page");
        total_page
    } else {
        requested
    };

    let offset = current_page.saturating_sub(1).saturating_mul(page_size);
    query.page = Some(current_page as i64);
    query.limit = Some(size);
    query.offset = Some(i64::try_from(offset).unwrap_or(i64::MAX));

    debug!(total_row, total_page, current_page, offset, limit = size, "computed page window");

    Ok(PageInfo {
        total_row,
        total_page,
        page_size,
        current_page,
    })
}

//! The query descriptor produced by translation.
//!
//! A [`Query`] is storage agnostic: predicates are plain `column = ?` /
//! `column LIKE ?` fragments with a parallel list of positional arguments.
//! The storage collaborator binds `args()[i]` to the `i`-th placeholder.
//!
//! ```rust
//! use pager_query::{FilterArgs, Pager};
//!
//! let pager = Pager::default();
//! let query = pager.make_page_filter(
//!     &FilterArgs::new().arg("status", "active").arg("name", "jo").arg("page", "2"),
//!     &["name"],
//! );
//!
//! assert_eq!(query.where_clause(), "status = ? AND name LIKE ?");
//! assert_eq!(
//!     query.build_select_sql("users"),
//!     "SELECT * FROM users WHERE status = ? AND name LIKE ? LIMIT 20 OFFSET 20"
//! );
//! ```

use std::fmt::Write;

use crate::error::QueryResult;
use crate::filter::FilterValue;
use crate::pagination::{self, PageInfo};
use crate::traits::RowCounter;
use crate::types::OrderBy;

/// Limit applied when rendering a query that carries no window of its own.
pub const FALLBACK_LIMIT: i64 = 50;

/// A structured, storage-agnostic list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub(crate) predicates: Vec<String>,
    pub(crate) args: Vec<FilterValue>,
    pub(crate) order: OrderBy,
    pub(crate) no_page: bool,
    pub(crate) page: Option<i64>,
    pub(crate) size: Option<i64>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
}

impl Query {
    /// Create an empty, non-paginating query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a page window, builder style.
    ///
    /// Limit and offset are derived as `size` and `(page - 1) * size`, with the
    /// offset floored at 0 for pages below 1.
    pub fn with_page(mut self, page: i64, size: i64) -> Self {
        self.set_window(page, size);
        self
    }

    /// Replace the sort directive, builder style.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub(crate) fn set_window(&mut self, page: i64, size: i64) {
        self.page = Some(page);
        self.size = Some(size);
        self.limit = Some(size);
        self.offset = Some(page.saturating_sub(1).saturating_mul(size).max(0));
    }

    /// Predicate fragments, equality clauses first, then substring clauses.
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// Positional arguments, aligned with [`Query::predicates`].
    pub fn args(&self) -> &[FilterValue] {
        &self.args
    }

    /// Sort directive.
    pub fn order(&self) -> &OrderBy {
        &self.order
    }

    /// Whether the request asked to skip pagination.
    pub fn no_page(&self) -> bool {
        self.no_page
    }

    /// Whether this query carries a page request.
    pub fn is_paginated(&self) -> bool {
        self.page.is_some()
    }

    /// Requested (or, after [`Query::paginate`], clamped) page number.
    pub fn page(&self) -> Option<i64> {
        self.page
    }

    /// Requested page size.
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    /// Row limit for the fetch.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Row offset for the fetch.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Count rows through `counter`, clamp the page, and fix limit and offset.
    pub fn paginate<C: RowCounter + ?Sized>(&mut self, counter: &C) -> QueryResult<PageInfo> {
        pagination::paginate(self, counter)
    }

    /// Predicates joined with `AND`; empty when there are none.
    pub fn where_clause(&self) -> String {
        self.predicates.join(" AND ")
    }

    /// Sort fields as `col DIR, ...`; empty when unsorted.
    pub fn order_clause(&self) -> String {
        self.order.to_sql()
    }

    /// `LIMIT n [OFFSET m]`.
    ///
    /// Queries without a window use [`FALLBACK_LIMIT`]. A zero or negative
    /// offset is omitted.
    pub fn window_sql(&self) -> String {
        let mut sql = String::with_capacity(32);
        self.write_window_sql(&mut sql);
        sql
    }

    fn write_window_sql(&self, buffer: &mut String) {
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => FALLBACK_LIMIT,
        };
        let _ = write!(buffer, "LIMIT {}", limit);
        if let Some(offset) = self.offset.filter(|offset| *offset > 0) {
            let _ = write!(buffer, " OFFSET {}", offset);
        }
    }

    /// `SELECT COUNT(*) FROM table [WHERE ...]`.
    pub fn build_count_sql(&self, table: &str) -> String {
        let mut sql = String::with_capacity(64);
        sql.push_str("SELECT COUNT(*) FROM ");
        sql.push_str(table);
        self.write_where(&mut sql);
        sql
    }

    /// `SELECT * FROM table [WHERE ...] [ORDER BY ...] LIMIT n [OFFSET m]`.
    pub fn build_select_sql(&self, table: &str) -> String {
        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT * FROM ");
        sql.push_str(table);
        self.write_where(&mut sql);
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            self.order.write_sql(&mut sql);
        }
        sql.push(' ');
        self.write_window_sql(&mut sql);
        sql
    }

    fn write_where(&self, buffer: &mut String) {
        if !self.predicates.is_empty() {
            buffer.push_str(" WHERE ");
            buffer.push_str(&self.where_clause());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderByField;
    use pretty_assertions::assert_eq;

    fn sample() -> Query {
        Query {
            predicates: vec!["status = ?".into(), "name LIKE ?".into()],
            args: vec!["active".into(), "%john%".into()],
            ..Query::default()
        }
    }

    #[test]
    fn test_with_page_derives_window() {
        let query = Query::new().with_page(3, 20);
        assert!(query.is_paginated());
        assert_eq!(query.limit(), Some(20));
        assert_eq!(query.offset(), Some(40));
    }

    #[test]
    fn test_window_saturates() {
        let query = Query::new().with_page(i64::MAX, 50);
        assert_eq!(query.offset(), Some(i64::MAX));

        let query = Query::new().with_page(-2, 10);
        assert_eq!(query.offset(), Some(0));
        assert_eq!(query.window_sql(), "LIMIT 10");

        let query = Query::new().with_page(0, 20);
        assert_eq!(query.offset(), Some(0));
    }

    #[test]
    fn test_unpaged_query_uses_fallback_limit() {
        let query = sample();
        assert!(!query.is_paginated());
        assert_eq!(query.limit(), None);
        assert_eq!(query.window_sql(), "LIMIT 50");
    }

    #[test]
    fn test_where_clause() {
        assert_eq!(sample().where_clause(), "status = ? AND name LIKE ?");
        assert_eq!(Query::new().where_clause(), "");
    }

    #[test]
    fn test_build_count_sql() {
        assert_eq!(
            sample().build_count_sql("users"),
            "SELECT COUNT(*) FROM users WHERE status = ? AND name LIKE ?"
        );
        assert_eq!(Query::new().build_count_sql("users"), "SELECT COUNT(*) FROM users");
    }

    #[test]
    fn test_build_select_sql() {
        let query = sample()
            .with_order(OrderBy::from_fields([OrderByField::desc("created_at"), OrderByField::asc("id")]))
            .with_page(2, 10);
        assert_eq!(
            query.build_select_sql("users"),
            "SELECT * FROM users WHERE status = ? AND name LIKE ? ORDER BY created_at DESC, id ASC LIMIT 10 OFFSET 10"
        );
    }
}

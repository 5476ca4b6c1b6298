//! List operation: filter translation plus pagination against an engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QueryResult;
use crate::filter::FilterArgs;
use crate::pager::Pager;
use crate::pagination::{self, Page};
use crate::query::Query;
use crate::traits::QueryEngine;

/// Outcome of [`ListOperation::exec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResult<T> {
    /// One page of rows with its metadata.
    Paged(Page<Vec<T>>),
    /// Every matching row; the request carried the no-pagination key.
    All(Vec<T>),
}

impl<T> ListResult<T> {
    /// The fetched rows, whichever variant this is.
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Paged(page) => &page.results,
            Self::All(rows) => rows,
        }
    }

    /// Consume the result, returning the rows.
    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.results,
            Self::All(rows) => rows,
        }
    }

    /// Whether this result is a single page.
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Paged(_))
    }
}

/// A list operation built from request arguments.
///
/// # Example
///
/// ```rust,ignore
/// let page = ListOperation::new(&engine, pager.clone())
///     .filters(FilterArgs::from_query_map(&params))
///     .like_fields(["name", "email"])
///     .preload(["profile"])
///     .exec_page::<User>()
///     .await?;
/// ```
pub struct ListOperation<E: QueryEngine> {
    engine: E,
    pager: Pager,
    args: FilterArgs,
    like_fields: Vec<String>,
    preload: Vec<String>,
}

impl<E: QueryEngine> ListOperation<E> {
    /// Create a new List operation.
    pub fn new(engine: E, pager: Pager) -> Self {
        Self {
            engine,
            pager,
            args: FilterArgs::new(),
            like_fields: Vec::new(),
            preload: Vec::new(),
        }
    }

    /// Set the request arguments.
    pub fn filters(mut self, args: FilterArgs) -> Self {
        self.args = args;
        self
    }

    /// Columns matched by substring instead of equality.
    pub fn like_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.like_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Relations to load alongside each row.
    pub fn preload<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preload.extend(relations.into_iter().map(Into::into));
        self
    }

    /// Build the paginating query without executing it.
    pub fn build_page_query(&self) -> Query {
        self.pager.make_page_filter(&self.args, &self.like_fields)
    }

    /// Build the non-paginating query without executing it.
    pub fn build_all_query(&self) -> Query {
        self.pager.make_no_page_filter(&self.args, &self.like_fields)
    }

    /// Count, clamp the requested page and fetch it.
    pub async fn exec_page<T: Send + 'static>(self) -> QueryResult<Page<Vec<T>>> {
        let mut query = self.build_page_query();
        pagination::requested_window(&query)?;

        let total = self.engine.count(&query).await?;
        debug!(total, "counted matching rows");

        let info = query.paginate(&total)?;
        crate::pager_debug!(
            where_clause = %query.where_clause(),
            window = %query.window_sql(),
            "fetching page"
        );

        let rows = self.engine.find_many::<T>(&query, &self.preload).await?;
        Ok(info.with_results(rows))
    }

    /// Fetch every matching row.
    pub async fn exec_all<T: Send + 'static>(self) -> QueryResult<Vec<T>> {
        let query = self.build_all_query();
        crate::pager_debug!(where_clause = %query.where_clause(), "fetching all rows");

        let rows = self.engine.find_many::<T>(&query, &self.preload).await?;
        debug!(rows = rows.len(), "fetched unpaginated rows");
        Ok(rows)
    }

    /// Dispatch on the no-pagination key: all rows when present, otherwise a page.
    pub async fn exec<T: Send + 'static>(self) -> QueryResult<ListResult<T>> {
        if self.pager.wants_all(&self.args) {
            self.exec_all().await.map(ListResult::All)
        } else {
            self.exec_page().await.map(ListResult::Paged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::config::PagerOptions;
    use crate::error::{ErrorCode, QueryError};
    use crate::filter::FilterValue;
    use crate::traits::BoxFuture;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct MockEngine {
        rows: Vec<i64>,
        fail_count: bool,
        count_calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<(Query, Vec<String>)>>>,
    }

    impl MockEngine {
        fn with_rows(n: i64) -> Self {
            Self {
                rows: (1..=n).collect(),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_count: true,
                ..Default::default()
            }
        }

        fn last_query(&self) -> Query {
            self.seen.lock().unwrap().last().unwrap().0.clone()
        }
    }

    impl QueryEngine for MockEngine {
        fn count(&self, _query: &Query) -> BoxFuture<'_, QueryResult<u64>> {
            self.count_calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.fail_count {
                Err(QueryError::connection("refused"))
            } else {
                Ok(self.rows.len() as u64)
            };
            Box::pin(async move { result })
        }

        fn find_many<T: Send + 'static>(
            &self,
            query: &Query,
            preload: &[String],
        ) -> BoxFuture<'_, QueryResult<Vec<T>>> {
            self.seen
                .lock()
                .unwrap()
                .push((query.clone(), preload.to_vec()));
            // Rows are never materialised as T; the window is what the tests check.
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    fn pager() -> Pager {
        Pager::new(&PagerOptions {
            max_page_size: 10,
            ..Default::default()
        })
    }

    // ========== Paged Execution ==========

    #[tokio::test]
    async fn test_exec_page_clamps_and_windows() {
        let engine = MockEngine::with_rows(95);
        let page = ListOperation::new(&engine, pager())
            .filters(FilterArgs::new().arg("status", "open").arg("page", "42"))
            .exec_page::<()>()
            .await
            .unwrap();

        assert_eq!(page.total_row, 95);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_page, 10);
        assert_eq!(page.current_page, 10);

        let query = engine.last_query();
        assert_eq!(query.limit(), Some(10));
        assert_eq!(query.offset(), Some(90));
        assert_eq!(query.predicates(), &["status = ?"]);
    }

    #[tokio::test]
    async fn test_exec_page_passes_preload_and_like_fields() {
        let engine = MockEngine::with_rows(3);
        ListOperation::new(&engine, pager())
            .filters(FilterArgs::new().arg("name", "jo"))
            .like_fields(["name"])
            .preload(["profile", "posts"])
            .exec_page::<()>()
            .await
            .unwrap();

        let seen = engine.seen.lock().unwrap();
        let (query, preload) = &seen[0];
        assert_eq!(query.predicates(), &["name LIKE ?"]);
        assert_eq!(query.args(), &[FilterValue::from("%jo%")]);
        assert_eq!(preload, &["profile", "posts"]);
    }

    #[tokio::test]
    async fn test_exec_page_empty_table() {
        let engine = MockEngine::with_rows(0);
        let page = ListOperation::new(&engine, pager())
            .exec_page::<()>()
            .await
            .unwrap();

        assert_eq!(page.total_page, 0);
        assert_eq!(page.current_page, 0);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_exec_page_count_failure_skips_fetch() {
        let engine = MockEngine::failing();
        let err = ListOperation::new(&engine, pager())
            .exec_page::<()>()
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConnectionFailed);
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exec_page_rejects_bad_size_before_counting() {
        for size in ["0", "-3"] {
            let engine = MockEngine::with_rows(10);
            let err = ListOperation::new(&engine, pager())
                .filters(FilterArgs::new().arg("size", size))
                .exec_page::<()>()
                .await
                .unwrap_err();

            assert_eq!(err.code, ErrorCode::InvalidParameter);
            assert_eq!(engine.count_calls.load(Ordering::SeqCst), 0);
            assert!(engine.seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_exec_page_counts_once() {
        let engine = MockEngine::with_rows(10);
        ListOperation::new(&engine, pager())
            .exec_page::<()>()
            .await
            .unwrap();
        assert_eq!(engine.count_calls.load(Ordering::SeqCst), 1);
    }

    // ========== Unpaged Execution ==========

    #[tokio::test]
    async fn test_exec_all_has_no_window() {
        let engine = MockEngine::with_rows(500);
        ListOperation::new(&engine, pager())
            .filters(FilterArgs::new().arg("page", "3").arg("size", "5"))
            .exec_all::<()>()
            .await
            .unwrap();

        let query = engine.last_query();
        assert!(!query.is_paginated());
        assert_eq!(query.limit(), None);
        // page and size are ordinary filters without pagination
        assert_eq!(query.predicates(), &["page = ?", "size = ?"]);
    }

    // ========== Dispatch ==========

    #[tokio::test]
    async fn test_exec_dispatches_on_no_page_key() {
        let engine = MockEngine::with_rows(7);
        let result = ListOperation::new(&engine, pager())
            .filters(FilterArgs::new().arg("no_page", "1"))
            .exec::<()>()
            .await
            .unwrap();
        assert!(!result.is_paged());
        assert!(engine.last_query().no_page());

        let result = ListOperation::new(&engine, pager())
            .filters(FilterArgs::new().arg("page", "1"))
            .exec::<()>()
            .await
            .unwrap();
        assert!(result.is_paged());
        assert!(result.rows().is_empty());
    }

    #[test]
    fn test_build_queries() {
        let op = ListOperation::new(MockEngine::default(), pager())
            .filters(FilterArgs::new().arg("page", "2").arg("order", "-id"));

        let paged = op.build_page_query();
        assert_eq!(paged.offset(), Some(10));
        assert_eq!(paged.order_clause(), "id DESC");

        let all = op.build_all_query();
        assert_eq!(all.predicates(), &["page = ?"]);
        assert_eq!(all.order_clause(), "id DESC");
    }

    #[test]
    fn test_list_result_json() {
        let all: ListResult<i32> = ListResult::All(vec![1, 2]);
        assert_eq!(serde_json::to_string(&all).unwrap(), "[1,2]");
        assert_eq!(all.into_rows(), vec![1, 2]);
    }
}

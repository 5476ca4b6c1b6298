//! Seams to the storage collaborator.
//!
//! The pager never talks to a database. A [`RowCounter`] answers "how many
//! rows match these predicates" for the page calculator, and a
//! [`QueryEngine`] runs counts and bounded fetches for the list operation.

pub use futures::future::BoxFuture;

use crate::error::QueryResult;
use crate::query::Query;

/// Synchronous row-count provider used by the page calculator.
///
/// Implemented for closures and for a plain `u64` holding a count that was
/// obtained elsewhere:
///
/// ```rust
/// use pager_query::{Query, QueryError, RowCounter};
///
/// let query = Query::new().with_page(1, 20);
/// assert_eq!(95u64.count_rows(&query).unwrap(), 95);
///
/// let failing = |_: &Query| -> Result<u64, QueryError> { Err(QueryError::database("gone")) };
/// assert!(failing.count_rows(&query).is_err());
/// ```
pub trait RowCounter {
    /// Count the rows matching `query`'s predicates and arguments.
    fn count_rows(&self, query: &Query) -> QueryResult<u64>;
}

impl<F> RowCounter for F
where
    F: Fn(&Query) -> QueryResult<u64>,
{
    fn count_rows(&self, query: &Query) -> QueryResult<u64> {
        self(query)
    }
}

impl RowCounter for u64 {
    fn count_rows(&self, _query: &Query) -> QueryResult<u64> {
        Ok(*self)
    }
}

/// Async storage engine that executes list queries.
///
/// Implementations render the [`Query`] for their store (for SQL stores
/// [`Query::build_count_sql`] and [`Query::build_select_sql`] are a starting
/// point) and bind [`Query::args`] positionally.
pub trait QueryEngine: Send + Sync {
    /// Count rows matching the query's predicates, ignoring order and window.
    fn count(&self, query: &Query) -> BoxFuture<'_, QueryResult<u64>>;

    /// Fetch rows matching the query, honouring order, limit and offset.
    ///
    /// `preload` names relations to load eagerly alongside each row.
    fn find_many<T: Send + 'static>(
        &self,
        query: &Query,
        preload: &[String],
    ) -> BoxFuture<'_, QueryResult<Vec<T>>>;
}

impl<E: QueryEngine + ?Sized> QueryEngine for &E {
    fn count(&self, query: &Query) -> BoxFuture<'_, QueryResult<u64>> {
        (**self).count(query)
    }

    fn find_many<T: Send + 'static>(
        &self,
        query: &Query,
        preload: &[String],
    ) -> BoxFuture<'_, QueryResult<Vec<T>>> {
        (**self).find_many(query, preload)
    }
}

//! # pager-query
//!
//! Filter translation and page arithmetic for list endpoints.
//!
//! This crate turns the loose key/value parameters of a list request into a
//! storage-agnostic [`Query`]:
//! - Equality filters (`status = ?`) and substring filters (`name LIKE ?`)
//! - A sort directive from a compact `-created_at,id` syntax
//! - A page window whose size is clamped to a configured maximum
//! - Page clamping against a live row count
//!
//! ## Translating a request
//!
//! ```rust
//! use pager_query::{FilterArgs, FilterValue, Pager};
//!
//! let pager = Pager::default();
//! let args = FilterArgs::new()
//!     .arg("status", "active")
//!     .arg("name", "john")
//!     .arg("order", "-created_at")
//!     .arg("page", "2")
//!     .arg("size", "10");
//!
//! let query = pager.make_page_filter(&args, &["name"]);
//!
//! assert_eq!(query.predicates(), &["status = ?", "name LIKE ?"]);
//! assert_eq!(
//!     query.args(),
//!     &[FilterValue::from("active"), FilterValue::from("%john%")]
//! );
//! assert_eq!(query.order_clause(), "created_at DESC");
//! assert_eq!(query.limit(), Some(10));
//! assert_eq!(query.offset(), Some(10));
//! ```
//!
//! ## Clamping against a row count
//!
//! ```rust
//! use pager_query::{FilterArgs, Pager};
//!
//! let pager = Pager::default();
//! let mut query = pager.make_page_filter(&FilterArgs::new().arg("page", "7"), &[] as &[&str]);
//!
//! let info = query.paginate(&95u64).unwrap();
//! assert_eq!(info.total_page, 5);
//! assert_eq!(info.current_page, 5);
//! assert_eq!(query.offset(), Some(80));
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use pager_query::{Pager, PagerOptions};
//!
//! let options = PagerOptions::from_str("max_page_size = 100\norder_arg_name = \"sort\"").unwrap();
//! let pager = Pager::new(&options);
//! assert_eq!(pager.config().order_arg_name(), "sort");
//! assert_eq!(pager.config().default_page_size(), 20);
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use pager_query::{ErrorCode, Query};
//!
//! let err = Query::new().paginate(&10u64).unwrap_err();
//! assert_eq!(err.code, ErrorCode::InvalidParameter);
//! ```

pub mod config;
pub mod error;
pub mod filter;
#[macro_use]
pub mod logging;
pub mod operations;
pub mod pager;
pub mod pagination;
pub mod query;
pub mod traits;
pub mod types;

pub use config::{PagerConfig, PagerOptions};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use filter::{FilterArgs, FilterValue};
pub use operations::{ListOperation, ListResult};
pub use pager::Pager;
pub use pagination::{Page, PageInfo, paginate, requested_window, total_pages};
pub use query::{FALLBACK_LIMIT, Query};
pub use traits::{BoxFuture, QueryEngine, RowCounter};
pub use types::{OrderBy, OrderByField, SortOrder};

// Re-export tracing for the logging macros
#[doc(hidden)]
pub use tracing;

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{PagerConfig, PagerOptions};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::filter::{FilterArgs, FilterValue};
    pub use crate::operations::*;
    pub use crate::pager::Pager;
    pub use crate::pagination::{Page, PageInfo};
    pub use crate::query::Query;
    pub use crate::traits::{QueryEngine, RowCounter};
    pub use crate::types::{OrderBy, OrderByField, SortOrder};
}

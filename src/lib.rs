//! # Pager
//!
//! Consistent filter, sort and pagination semantics for list endpoints.
//!
//! Pager provides:
//! - Translation of request parameters into predicates and positional arguments
//! - A compact `-field,field` sort syntax
//! - Page size limits with configurable parameter names
//! - Page clamping against a live row count
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pager::prelude::*;
//!
//! async fn list_users(
//!     engine: &impl QueryEngine,
//!     params: &std::collections::HashMap<String, String>,
//! ) -> QueryResult<ListResult<User>> {
//!     let pager = Pager::new(&PagerOptions::from_file("pager.toml")?);
//!
//!     ListOperation::new(engine, pager)
//!         .filters(FilterArgs::from_query_map(params))
//!         .like_fields(["name", "email"])
//!         .exec()
//!         .await
//! }
//! ```
//!
//! ## Without an engine
//!
//! ```rust
//! use pager::{FilterArgs, Pager};
//!
//! let pager = Pager::default();
//! let mut query = pager.make_filter(&FilterArgs::new().arg("status", "open"), &[] as &[&str]);
//! let info = query.paginate(&3u64).unwrap();
//!
//! assert_eq!(info.total_page, 1);
//! assert_eq!(
//!     query.build_select_sql("tickets"),
//!     "SELECT * FROM tickets WHERE status = ? LIMIT 20"
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Filter translation, pagination and configuration.
pub mod query {
    pub use pager_query::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use pager_query::prelude::*;
}

// Re-export key types at the crate root
pub use pager_query::{
    FilterArgs, FilterValue, ListOperation, ListResult, Page, PageInfo, Pager, PagerConfig,
    PagerOptions, Query, QueryEngine, QueryError, QueryResult, RowCounter,
};

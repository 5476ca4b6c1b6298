//! Query operations for the fluent API.
//!
//! - `ListOperation` - Translate request filters, count, clamp and fetch a page

mod list;

pub use list::{ListOperation, ListResult};

//! Reserved parameter names and page size limits.
//!
//! [`PagerOptions`] is what callers write (by hand or in `pager.toml`); zero
//! or empty fields mean "use the default". [`PagerOptions::normalize`] turns it
//! into an immutable [`PagerConfig`] without touching the options.
//!
//! ```rust
//! use pager_query::config::PagerOptions;
//!
//! let config = PagerOptions {
//!     max_page_size: 10,
//!     ..Default::default()
//! }
//! .normalize();
//!
//! assert_eq!(config.max_page_size(), 10);
//! assert_eq!(config.default_page_size(), 10); // 20 clamped to the maximum
//! assert_eq!(config.page_size_arg_name(), "size");
//! ```
//!
//! # File format
//!
//! Keys may sit at the top level or under a `[pager]` table, and `${VAR}`
//! references are expanded from the environment:
//!
//! ```toml
//! [pager]
//! max_page_size = 100
//! default_page_size = 25
//! order_arg_name = "sort"
//! no_page_arg_name = "${PAGER_NO_PAGE_KEY}"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Default maximum page size.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 50;
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Default name of the page size parameter.
pub const DEFAULT_PAGE_SIZE_ARG: &str = "size";
/// Default name of the page number parameter.
pub const DEFAULT_CURRENT_PAGE_ARG: &str = "page";
/// Default name of the sort parameter.
pub const DEFAULT_ORDER_ARG: &str = "order";
/// Default name of the no-pagination parameter.
pub const DEFAULT_NO_PAGE_ARG: &str = "no_page";

/// User-facing pager options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerOptions {
    /// Largest page size a request may ask for (0 = 50).
    pub max_page_size: u32,
    /// Page size used when the request does not give one (0 = 20).
    pub default_page_size: u32,
    /// Name of the page size parameter (empty = `size`).
    pub page_size_arg_name: String,
    /// Name of the page number parameter (empty = `page`).
    pub current_page_arg_name: String,
    /// Name of the sort parameter (empty = `order`).
    pub order_arg_name: String,
    /// Name of the no-pagination parameter (empty = `no_page`).
    pub no_page_arg_name: String,
}

impl PagerOptions {
    /// Load options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| QueryError::missing_configuration(path.display().to_string()).with_source(e))?;

        Self::from_str(&content)
    }

    /// Parse options from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> QueryResult<Self> {
        let expanded = expand_env_vars(content);

        let mut table: toml::Table = toml::from_str(&expanded)
            .map_err(|e| QueryError::invalid_configuration(e.message().to_string()).with_source(e))?;

        let section = match table.remove("pager") {
            Some(toml::Value::Table(section)) => {
                if let Some(key) = table.keys().next() {
                    return Err(QueryError::invalid_configuration(format!(
                        "unexpected key `{}` next to the [pager] table",
                        key
                    ))
                    .with_field(key.clone()));
                }
                section
            }
            Some(_) => {
                return Err(QueryError::invalid_configuration("`pager` must be a table")
                    .with_field("pager"));
            }
            None => table,
        };

        toml::Value::Table(section)
            .try_into()
            .map_err(|e: toml::de::Error| {
                QueryError::invalid_configuration(e.message().to_string()).with_source(e)
            })
    }

    /// Fill in defaults and clamp the default page size to the maximum.
    pub fn normalize(&self) -> PagerConfig {
        let max_page_size = non_zero_or(self.max_page_size, DEFAULT_MAX_PAGE_SIZE);
        let default_page_size =
            non_zero_or(self.default_page_size, DEFAULT_PAGE_SIZE).min(max_page_size);

        PagerConfig {
            max_page_size,
            default_page_size,
            page_size_arg_name: non_empty_or(&self.page_size_arg_name, DEFAULT_PAGE_SIZE_ARG),
            current_page_arg_name: non_empty_or(&self.current_page_arg_name, DEFAULT_CURRENT_PAGE_ARG),
            order_arg_name: non_empty_or(&self.order_arg_name, DEFAULT_ORDER_ARG),
            no_page_arg_name: non_empty_or(&self.no_page_arg_name, DEFAULT_NO_PAGE_ARG),
        }
    }
}

/// Normalized, read-only pager configuration.
///
/// Always satisfies `1 <= default_page_size <= max_page_size` and has
/// non-empty reserved names. Distinctness of the names is only checked by
/// [`PagerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    max_page_size: u32,
    default_page_size: u32,
    page_size_arg_name: String,
    current_page_arg_name: String,
    order_arg_name: String,
    no_page_arg_name: String,
}

impl Default for PagerConfig {
    fn default() -> Self {
        PagerOptions::default().normalize()
    }
}

impl PagerConfig {
    /// Largest page size a request may ask for.
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Page size used when the request does not give one.
    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Name of the page size parameter.
    pub fn page_size_arg_name(&self) -> &str {
        &self.page_size_arg_name
    }

    /// Name of the page number parameter.
    pub fn current_page_arg_name(&self) -> &str {
        &self.current_page_arg_name
    }

    /// Name of the sort parameter.
    pub fn order_arg_name(&self) -> &str {
        &self.order_arg_name
    }

    /// Name of the no-pagination parameter.
    pub fn no_page_arg_name(&self) -> &str {
        &self.no_page_arg_name
    }

    /// The four reserved parameter names.
    pub fn reserved_keys(&self) -> [&str; 4] {
        [
            self.current_page_arg_name.as_str(),
            self.page_size_arg_name.as_str(),
            self.order_arg_name.as_str(),
            self.no_page_arg_name.as_str(),
        ]
    }

    /// Check whether `key` is one of the reserved parameter names.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys().contains(&key)
    }

    /// Reject configurations where two reserved names collide.
    pub fn validate(&self) -> QueryResult<()> {
        let keys = self.reserved_keys();
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(QueryError::invalid_configuration(format!(
                    "reserved parameter name `{}` is used more than once",
                    key
                ))
                .with_field(key.to_string())
                .with_suggestion("Give the page, size, order and no-page parameters distinct names"));
            }
        }
        Ok(())
    }
}

impl From<PagerOptions> for PagerConfig {
    fn from(options: PagerOptions) -> Self {
        options.normalize()
    }
}

fn non_zero_or(value: u32, default: u32) -> u32 {
    if value == 0 { default } else { value }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Expand `${VAR}` references; unknown variables are left as written.
fn expand_env_vars(content: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

//! Translation of request parameters into a [`Query`].
//!
//! Each parameter is classified against the configured reserved names:
//!
//! | Parameter                  | Effect                                        |
//! |----------------------------|-----------------------------------------------|
//! | sort key                   | comma-separated fields, `-` prefix = DESC     |
//! | page key (paginating)      | requested page, default 1                     |
//! | size key (paginating)      | requested size, clamped to the maximum        |
//! | no-page key                | marks the query as unpaginated                |
//! | field in `like_fields`     | `field LIKE ?` with `%value%`                 |
//! | any other non-empty key    | `field = ?` with the raw value                |
//! | empty key                  | dropped                                       |
//!
//! Equality clauses come before substring clauses; within each group the
//! order of [`FilterArgs`] is kept. Malformed page or size values are ignored.
//!
//! ```rust
//! use pager_query::{FilterArgs, FilterValue, Pager, PagerOptions};
//! use pager_query::types::OrderByField;
//!
//! let pager = Pager::new(&PagerOptions::default());
//! let args = FilterArgs::new()
//!     .arg("status", "active")
//!     .arg("name", "john")
//!     .arg("order", "-created_at,id")
//!     .arg("page", "3")
//!     .arg("size", "200");
//!
//! let query = pager.make_page_filter(&args, &["name"]);
//!
//! assert_eq!(query.predicates(), &["status = ?", "name LIKE ?"]);
//! assert_eq!(query.args(), &[FilterValue::from("active"), FilterValue::from("%john%")]);
//! assert_eq!(
//!     query.order().fields(),
//!     &[OrderByField::desc("created_at"), OrderByField::asc("id")]
//! );
//! assert_eq!(query.page(), Some(3));
//! assert_eq!(query.size(), Some(50));
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::config::{PagerConfig, PagerOptions};
use crate::filter::{FilterArgs, FilterValue};
use crate::query::Query;

/// Translates request parameters using a fixed naming scheme.
///
/// Cheap to clone and safe to share between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    config: PagerConfig,
}

impl Pager {
    /// Create a pager from user options.
    pub fn new(options: &PagerOptions) -> Self {
        Self::with_config(options.normalize())
    }

    /// Create a pager from an already normalized configuration.
    pub fn with_config(config: PagerConfig) -> Self {
        Self { config }
    }

    /// The naming scheme and size limits in use.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Build a paginating query.
    pub fn make_page_filter<S: AsRef<str>>(&self, args: &FilterArgs, like_fields: &[S]) -> Query {
        self.translate(args, like_fields, true)
    }

    /// Build a query that fetches every matching row.
    ///
    /// Page and size parameters are not reserved here and become ordinary
    /// equality filters.
    pub fn make_no_page_filter<S: AsRef<str>>(&self, args: &FilterArgs, like_fields: &[S]) -> Query {
        self.translate(args, like_fields, false)
    }

    /// Paginate unless the no-page parameter is present.
    pub fn make_filter<S: AsRef<str>>(&self, args: &FilterArgs, like_fields: &[S]) -> Query {
        if self.wants_all(args) {
            self.make_no_page_filter(args, like_fields)
        } else {
            self.make_page_filter(args, like_fields)
        }
    }

    /// Whether `args` carry the no-page parameter, whatever its value.
    pub fn wants_all(&self, args: &FilterArgs) -> bool {
        args.contains_key(self.config.no_page_arg_name())
    }

    fn translate<S: AsRef<str>>(&self, args: &FilterArgs, like_fields: &[S], paginating: bool) -> Query {
        let config = &self.config;
        let like_fields: HashSet<&str> = like_fields.iter().map(|field| field.as_ref()).collect();
        let max_size = i64::from(config.max_page_size());

        let mut query = Query::new();
        let mut likes: Vec<String> = Vec::new();
        let mut like_args: Vec<FilterValue> = Vec::new();
        let mut page: i64 = 1;
        let mut size = i64::from(config.default_page_size());

        for (key, value) in args.iter() {
            if key == config.order_arg_name() {
                match value.as_str() {
                    Some(spec) => query.order.extend_from_str(spec),
                    None => debug!(key, ?value, "ignoring non-string sort parameter"),
                }
                continue;
            }

            if paginating && key == config.current_page_arg_name() {
                match value.as_int() {
                    Some(parsed) => page = parsed,
                    None => debug!(key, ?value, "ignoring malformed page number"),
                }
                continue;
            }

            if paginating && key == config.page_size_arg_name() {
                match value.as_int() {
                    Some(parsed) => size = parsed,
                    None => debug!(key, ?value, "ignoring malformed page size"),
                }
                size = size.min(max_size);
                continue;
            }

            if key == config.no_page_arg_name() {
                query.no_page = true;
                continue;
            }

            if key.is_empty() {
                continue;
            }

            if like_fields.contains(key) {
                likes.push(format!("{} LIKE ?", key));
                like_args.push(FilterValue::String(format!("%{}%", value)));
            } else {
                query.predicates.push(format!("{} = ?", key));
                query.args.push(value.clone());
            }
        }

        query.predicates.append(&mut likes);
        query.args.append(&mut like_args);

        if paginating {
            query.set_window(page, size);
        }

        crate::pager_trace!(
            predicates = query.predicates.len(),
            sort_fields = query.order.field_count(),
            paginating,
            no_page = query.no_page,
            "translated filter parameters"
        );

        query
    }
}

impl From<PagerOptions> for Pager {
    fn from(options: PagerOptions) -> Self {
        Self::new(&options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderByField;
    use pretty_assertions::assert_eq;

    const NO_LIKES: &[&str] = &[];

    fn pager() -> Pager {
        Pager::default()
    }

    #[test]
    fn test_scenario_page_filter() {
        let args = FilterArgs::new()
            .arg("status", "active")
            .arg("name", "john")
            .arg("order", "-created_at,id")
            .arg("page", "3")
            .arg("size", "200");

        let query = pager().make_page_filter(&args, &["name"]);

        assert_eq!(query.predicates(), &["status = ?".to_string(), "name LIKE ?".to_string()]);
        assert_eq!(query.args(), &[FilterValue::from("active"), FilterValue::from("%john%")]);
        assert_eq!(
            query.order().fields(),
            &[OrderByField::desc("created_at"), OrderByField::asc("id")]
        );
        assert_eq!(query.page(), Some(3));
        assert_eq!(query.size(), Some(50));
        assert_eq!(query.limit(), Some(50));
        assert_eq!(query.offset(), Some(100));
        assert!(!query.no_page());
    }

    #[test]
    fn test_equality_before_like_regardless_of_order() {
        let args = FilterArgs::new()
            .arg("name", "jo")
            .arg("a", 1)
            .arg("email", "example")
            .arg("b", true);

        let query = pager().make_page_filter(&args, &["name", "email"]);
        assert_eq!(
            query.predicates(),
            &["a = ?", "b = ?", "name LIKE ?", "email LIKE ?"].map(String::from)
        );
        assert_eq!(
            query.args(),
            &[
                FilterValue::Int(1),
                FilterValue::Bool(true),
                FilterValue::from("%jo%"),
                FilterValue::from("%example%"),
            ]
        );
    }

    #[test]
    fn test_like_value_is_stringified() {
        let args = FilterArgs::new().arg("code", 42);
        let query = pager().make_no_page_filter(&args, &["code"]);
        assert_eq!(query.args(), &[FilterValue::from("%42%")]);
    }

    #[test]
    fn test_empty_key_dropped() {
        let args = FilterArgs::new().arg("", "x").arg("status", "on");
        let query = pager().make_page_filter(&args, NO_LIKES);
        assert_eq!(query.predicates(), &["status = ?".to_string()]);
        assert_eq!(query.args().len(), 1);
    }

    #[test]
    fn test_empty_key_dropped_even_as_like_field() {
        let args = FilterArgs::new().arg("", "x").arg("status", "on");
        for query in [
            pager().make_page_filter(&args, &[""]),
            pager().make_no_page_filter(&args, &["", "status"]),
        ] {
            assert_eq!(query.predicates().len(), 1);
            assert!(query.predicates().iter().all(|p| !p.starts_with(' ')));
            assert!(!query.args().contains(&FilterValue::from("%x%")));
        }
    }

    #[test]
    fn test_no_page_key_never_a_predicate() {
        let args = FilterArgs::new().arg("no_page", "1").arg("status", "done");
        for query in [
            pager().make_page_filter(&args, NO_LIKES),
            pager().make_no_page_filter(&args, NO_LIKES),
            pager().make_page_filter(&args, &["no_page"]),
        ] {
            assert!(query.no_page());
            assert_eq!(query.predicates(), &["status = ?".to_string()]);
        }
    }

    #[test]
    fn test_auto_dispatch_without_pagination() {
        let args = FilterArgs::new().arg("no_page", "1").arg("status", "done");
        let query = pager().make_filter(&args, NO_LIKES);

        assert!(query.no_page());
        assert!(!query.is_paginated());
        assert_eq!(query.predicates(), &["status = ?".to_string()]);
        assert_eq!(query.limit(), None);
        assert_eq!(query.offset(), None);
    }

    #[test]
    fn test_auto_dispatch_with_pagination() {
        let args = FilterArgs::new().arg("status", "done");
        let query = pager().make_filter(&args, NO_LIKES);
        assert!(query.is_paginated());
        assert_eq!(query.page(), Some(1));
        assert_eq!(query.size(), Some(20));
        assert_eq!(query.offset(), Some(0));
    }

    #[test]
    fn test_no_page_mode_treats_page_keys_as_filters() {
        let args = FilterArgs::new().arg("page", "2").arg("size", "5").arg("no_page", true);
        let query = pager().make_no_page_filter(&args, NO_LIKES);
        assert_eq!(query.predicates(), &["page = ?", "size = ?"].map(String::from));
        assert_eq!(query.args(), &[FilterValue::from("2"), FilterValue::from("5")]);
    }

    #[test]
    fn test_malformed_page_and_size_fall_back() {
        let args = FilterArgs::new().arg("page", "two").arg("size", 1.5);
        let query = pager().make_page_filter(&args, NO_LIKES);
        assert_eq!(query.page(), Some(1));
        assert_eq!(query.size(), Some(20));
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn test_native_integers_accepted() {
        let args = FilterArgs::new().arg("page", 4).arg("size", 10);
        let query = pager().make_page_filter(&args, NO_LIKES);
        assert_eq!(query.page(), Some(4));
        assert_eq!(query.size(), Some(10));
        assert_eq!(query.offset(), Some(30));
    }

    #[test]
    fn test_size_always_clamped() {
        for requested in [51i64, 200, i64::MAX] {
            let args = FilterArgs::new().arg("size", requested);
            let query = pager().make_page_filter(&args, NO_LIKES);
            assert_eq!(query.size(), Some(50));
        }
    }

    #[test]
    fn test_zero_and_negative_values_kept_for_calculator() {
        let args = FilterArgs::new().arg("page", "-3").arg("size", "0");
        let query = pager().make_page_filter(&args, NO_LIKES);
        assert_eq!(query.page(), Some(-3));
        assert_eq!(query.size(), Some(0));
    }

    #[test]
    fn test_non_string_sort_ignored() {
        let args = FilterArgs::new().arg("order", 5);
        let query = pager().make_page_filter(&args, NO_LIKES);
        assert!(query.order().is_empty());
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn test_custom_names() {
        let pager = Pager::new(&PagerOptions {
            max_page_size: 100,
            page_size_arg_name: "per_page".into(),
            current_page_arg_name: "p".into(),
            order_arg_name: "sort".into(),
            no_page_arg_name: "all".into(),
            ..Default::default()
        });
        let args = FilterArgs::new()
            .arg("p", "2")
            .arg("per_page", "75")
            .arg("sort", "-score")
            .arg("page", "9");

        let query = pager.make_filter(&args, NO_LIKES);
        assert_eq!(query.page(), Some(2));
        assert_eq!(query.size(), Some(75));
        assert_eq!(query.order().fields(), &[OrderByField::desc("score")]);
        assert_eq!(query.predicates(), &["page = ?".to_string()]);
    }

    #[test]
    fn test_clauses_and_args_aligned() {
        let args = FilterArgs::new()
            .arg("a", 1)
            .arg("", 2)
            .arg("order", "x")
            .arg("b", "q")
            .arg("no_page", 0)
            .arg("c", FilterValue::Null);
        for query in [
            pager().make_filter(&args, &["b"]),
            pager().make_page_filter(&args, &["c", "a"]),
            pager().make_no_page_filter(&args, NO_LIKES),
        ] {
            assert_eq!(query.predicates().len(), query.args().len());
        }
    }
}

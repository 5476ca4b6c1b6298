//! Fuzz target for filter translation.
//!
//! Generates arbitrary request parameters and checks that translation is
//! total and that every predicate has exactly one argument.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_filter_translation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pager_query::{FilterArgs, FilterValue, Pager, PagerOptions};

/// A fuzzable filter value.
#[derive(Debug, Arbitrary, Clone)]
enum FuzzFilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<FuzzFilterValue> for FilterValue {
    fn from(val: FuzzFilterValue) -> Self {
        match val {
            FuzzFilterValue::Null => FilterValue::Null,
            FuzzFilterValue::Bool(b) => FilterValue::Bool(b),
            FuzzFilterValue::Int(i) => FilterValue::Int(i),
            FuzzFilterValue::Float(f) => FilterValue::Float(f),
            FuzzFilterValue::String(s) => FilterValue::String(s),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    max_page_size: u32,
    default_page_size: u32,
    args: Vec<(String, FuzzFilterValue)>,
    like_fields: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let pager = Pager::new(&PagerOptions {
        max_page_size: input.max_page_size,
        default_page_size: input.default_page_size,
        ..Default::default()
    });
    let args: FilterArgs = input.args.into_iter().collect();
    let max = i64::from(pager.config().max_page_size());

    let query = pager.make_page_filter(&args, &input.like_fields);
    assert_eq!(query.predicates().len(), query.args().len());
    assert!(query.size().is_some_and(|size| size <= max));
    let _ = query.build_select_sql("t");

    let query = pager.make_no_page_filter(&args, &input.like_fields);
    assert_eq!(query.predicates().len(), query.args().len());
    assert!(!query.is_paginated());
});

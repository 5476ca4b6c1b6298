//! Fuzz target for page clamping.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_pagination
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pager_query::Query;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    page: i64,
    size: i64,
    rows: u64,
}

fuzz_target!(|input: FuzzInput| {
    let mut query = Query::new().with_page(input.page, input.size);
    let Ok(info) = query.paginate(&input.rows) else {
        assert!(input.size < 1);
        return;
    };

    assert!(info.current_page <= info.total_page);
    assert!(info.total_page == 0 || info.current_page >= 1);
    assert_eq!(query.limit(), Some(input.size));
    assert!(query.offset().is_some_and(|offset| offset >= 0));

    // Same count, same answer
    let again = query.paginate(&input.rows);
    assert_eq!(again.ok(), Some(info));
});

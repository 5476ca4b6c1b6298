//! Fuzz target for the pager options parser.
//!
//! This target feeds arbitrary TOML strings to the options parser
//! to find crashes and panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pager_query::config::PagerOptions;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        if let Ok(options) = PagerOptions::from_str(input) {
            let config = options.normalize();
            assert!(config.default_page_size() >= 1);
            assert!(config.default_page_size() <= config.max_page_size());
            assert!(config.reserved_keys().iter().all(|key| !key.is_empty()));
            let _ = config.validate();
        }
    }
});

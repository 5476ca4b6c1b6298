//! Logging setup for pager.
//!
//! Library code only emits `tracing` events. Applications that do not install
//! their own subscriber can call [`init`], which is controlled by:
//!
//! - `PAGER_DEBUG=true|1|yes` - Enable debug logging
//! - `PAGER_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific log level
//! - `PAGER_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! ```rust,no_run
//! use pager_query::logging;
//!
//! logging::init();
//! ```
//!
//! Installing the subscriber needs the `tracing-subscriber` feature; without it
//! [`init`] is a no-op and events go to whatever subscriber the host installed.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `PAGER_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("PAGER_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `PAGER_LOG_LEVEL`.
///
/// Defaults to "debug" if `PAGER_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("PAGER_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `PAGER_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("PAGER_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the pager logging subscriber.
///
/// Subsequent calls are no-ops. Nothing is installed unless `PAGER_DEBUG` or
/// `PAGER_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("PAGER_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("pager={},pager_query={}", level, level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the host may already own the global subscriber
            let installed = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = get_log_format(), "pager logging initialized");
            }
        }
    });
}

/// Log at debug level only when `PAGER_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! pager_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            $crate::tracing::debug!($($arg)*);
        }
    };
}

/// Log at trace level only when `PAGER_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! pager_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            $crate::tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_expand_through_crate_path() {
        let window = "LIMIT 20";
        crate::pager_debug!(window, "debug event");
        crate::pager_trace!(count = 3, "trace event");
    }

    // Env-mutating assertions live in one test so they cannot race each other.
    #[test]
    fn test_env_driven_settings() {
        // SAFETY: only this test touches the PAGER_* variables
        unsafe {
            env::remove_var("PAGER_DEBUG");
            env::remove_var("PAGER_LOG_LEVEL");
            env::remove_var("PAGER_LOG_FORMAT");
        }
        assert!(!is_debug_enabled());
        assert_eq!(get_log_level(), "warn");
        assert_eq!(get_log_format(), "json");

        unsafe {
            env::set_var("PAGER_DEBUG", "YES");
        }
        assert!(is_debug_enabled());
        assert_eq!(get_log_level(), "debug");

        unsafe {
            env::set_var("PAGER_LOG_LEVEL", "bogus");
            env::set_var("PAGER_LOG_FORMAT", "compact");
        }
        assert_eq!(get_log_level(), "debug");
        assert_eq!(get_log_format(), "compact");

        unsafe {
            env::remove_var("PAGER_DEBUG");
            env::remove_var("PAGER_LOG_LEVEL");
            env::remove_var("PAGER_LOG_FORMAT");
        }
    }
}

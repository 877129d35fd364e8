//! Logging utilities and structured logging support

use std::str::FromStr;

pub use log::{debug, error, info, trace, warn};
use log::LevelFilter;

/// Initialize the logging system using `RUST_LOG` or the `info` level
pub fn init() {
    init_with_filter("info");
}

/// Initialize the logging system with a fallback filter
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls leave the first logger in place.
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Initialize logging before the level is known
///
/// Records at `initial` and above are emitted until [`apply_level`] changes
/// the level. With `RUST_LOG` set this behaves like [`init_with_filter`].
pub fn init_adjustable(initial: LevelFilter) {
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        init_with_filter(initial.as_str());
        return;
    }
    if env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
        return;
    }
    log::set_max_level(initial);
}

/// Switch the global level to a configured one such as `"debug"`
///
/// Returns false, leaving the level alone, when `RUST_LOG` is set or the
/// filter is not a plain level name.
pub fn apply_level(filter: &str) -> bool {
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        return false;
    }
    match parse_level(filter) {
        Some(level) => {
            log::set_max_level(level);
            true
        }
        None => {
            log::warn!("Ignoring log filter {:?}; expected a level name", filter);
            false
        }
    }
}

/// Parse a plain level name, case-insensitively
pub fn parse_level(filter: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(filter.trim()).ok()
}

#![deny(missing_docs)]
//! Shared logging utilities for the AudioHub workspace.
//!
//! Every crate logs through the `hub_*` macros so the facade can be swapped
//! in one place. The binary installs the real logger; tests call
//! [`initialize_for_tests`].

use std::sync::Once;

#[doc(hidden)]
pub use log;

/// Log target used by the push channel and the task registry plumbing.
pub const TARGET_SYNC: &str = "audiohub::sync";

/// Log target used by request/response calls against the backend.
pub const TARGET_GATEWAY: &str = "audiohub::gateway";

/// Logs a trace-level message.
#[macro_export]
macro_rules! hub_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! hub_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! hub_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! hub_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! hub_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test; only the first call installs the logger and
/// a logger installed elsewhere is left in place.
pub fn initialize_for_tests() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        let _ = CombinedLogger::init(vec![TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )]);
    });
}

#![deny(missing_docs)]
//! Logging macros shared by the SpeedX crates.
//!
//! The core logs session transitions at debug level, the engine logs each
//! analysis call, and the binary decides where the records end up. Callers
//! must depend on `log`, which the macros expand to.

/// Trace level. Used for response sizes and other per-call detail.
#[macro_export]
macro_rules! speedx_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Info level. One record per issued or completed analysis.
#[macro_export]
macro_rules! speedx_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Debug level. Session status changes and event-loop bookkeeping.
#[macro_export]
macro_rules! speedx_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Warn level. Failed analyses and completions that arrive out of turn.
#[macro_export]
macro_rules! speedx_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error level. Engine faults that cost a request its real outcome.
#[macro_export]
macro_rules! speedx_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Routes log records to stderr while tests run, so state-machine traces show
/// up next to a failing assertion.
///
/// Calling it again, or after another logger was installed, does nothing.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}

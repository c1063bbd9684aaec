#![deny(missing_docs)]
//! Shared logging utilities for the tailor workspace.
//!
//! This crate provides the `tailor_*` logging macros used across the codebase,
//! a thread-local operation tag that the macros prefix onto each message, and a
//! minimal test initializer for the global logger.

use std::cell::RefCell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Label of the operation currently running on this thread, if any.
    static OPERATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Restores the previous operation tag when dropped.
#[must_use = "the operation tag is cleared as soon as the scope is dropped"]
pub struct OperationScope {
    previous: Option<String>,
}

impl Drop for OperationScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        OPERATION.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Tags every log line emitted on this thread with `label` until the
/// returned scope is dropped.
///
/// The tag lives in thread-local storage, so it only applies to synchronous
/// sections; it does not follow an async task across `.await` points.
pub fn enter_operation(label: impl Into<String>) -> OperationScope {
    let label = label.into();
    let previous = OPERATION.with(|slot| slot.borrow_mut().replace(label));
    OperationScope { previous }
}

/// Returns the operation tag for the current thread.
pub fn current_operation() -> Option<String> {
    OPERATION.with(|slot| slot.borrow().clone())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tailor_log {
    ($level:ident, $($arg:tt)*) => {{
        match $crate::current_operation() {
            Some(op) => $crate::__log::$level!("[{}] {}", op, format_args!($($arg)*)),
            None => $crate::__log::$level!($($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! tailor_trace {
    ($($arg:tt)*) => { $crate::__tailor_log!(trace, $($arg)*) };
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! tailor_debug {
    ($($arg:tt)*) => { $crate::__tailor_log!(debug, $($arg)*) };
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! tailor_info {
    ($($arg:tt)*) => { $crate::__tailor_log!(info, $($arg)*) };
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! tailor_warn {
    ($($arg:tt)*) => { $crate::__tailor_log!(warn, $($arg)*) };
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! tailor_error {
    ($($arg:tt)*) => { $crate::__tailor_log!(error, $($arg)*) };
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have won the race to install a logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

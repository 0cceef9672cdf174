//! Logging macros with call-site capture
//!
//! These macros provide `println!`-style formatting on top of
//! [`TextLogger`](crate::core::TextLogger) and capture the call site
//! (module path, enclosing function, line) so the `{module}`, `{function}`
//! and `{lineno}` pattern fields are populated.
//!
//! # Examples
//!
//! ```
//! use unilog::prelude::*;
//! use unilog::info;
//!
//! let state = LoggingState::new();
//! let logger = state.text_logger("app");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Name of the enclosing function, without its module path.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        let name = ::std::any::type_name_of_val(&f);
        // trim the "::f" of the probe itself, then the module path
        let name = &name[..name.len() - 3];
        match name.rfind("::") {
            Some(idx) => &name[idx + 2..],
            None => name,
        }
    }};
}

/// Log a message with automatic formatting and call-site capture.
///
/// # Examples
///
/// ```
/// # use unilog::prelude::*;
/// # let state = LoggingState::new();
/// # let logger = state.text_logger("app");
/// use unilog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            $crate::core::CallSite {
                module: module_path!(),
                function: $crate::function_name!(),
                line: line!(),
            },
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Critical, $($arg)+)
    };
}

//! # Unilog
//!
//! An opinionated logging facade that wires a structured event logger and
//! a classic text logger under one policy.
//!
//! ## Features
//!
//! - **One entry point**: [`LoggingState::configure`](core::LoggingState)
//!   sets up both logging paths atomically enough for everyday use
//! - **Style auto-detection**: JSON when piped, colored text on a
//!   terminal, overridable through environment variables
//! - **Uniform output**: structured events and plain text records render
//!   through the same pattern, byte for byte
//! - **Ambient context**: scoped context variables appear in every record,
//!   whichever path produced it
//!
//! ## Quick start
//!
//! ```
//! use unilog::prelude::*;
//!
//! let state = LoggingState::new();
//! state.configure(ConfigureOptions::new()).unwrap();
//!
//! let logger = state.logger("app");
//! logger.info_event("request served")
//!     .field("user", "bob")
//!     .field("latency_ms", 42)
//!     .log();
//! ```

pub mod core;
pub mod formatters;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        CallSite, ConfigError, Configuration, ConfigureOptions, ContextGuard, ContextRenderer,
        ContextVar, EventBuilder, EventDict, FieldValue, LogLevel, LogRecord, LoggerDirective,
        LoggingState, NamedLoggerDirective, Result, SharedBuffer, StreamTarget, StructLogger,
        Style, TextLogger, DEFAULT_DATEFMT, DEFAULT_FMT,
    };
    pub use crate::formatters::{EventFormatter, JsonFormatter, RecordFormatter, TextFormatter};
}

pub use crate::core::{
    CallSite, ConfigError, Configuration, ConfigureOptions, ContextGuard, ContextRenderer,
    ContextVar, EventBuilder, EventDict, FieldValue, LogLevel, LogRecord, LoggerDirective,
    LoggingState, NamedLoggerDirective, Result, SharedBuffer, StreamTarget, StructLogger, Style,
    TextLogger, DEFAULT_DATEFMT, DEFAULT_FMT, ENV_FORCE_TEXT, ENV_FORCE_TEXT_COLOR,
    ENV_FORCE_TEXT_NO_COLOR, ENV_MESSAGE_FORMAT,
};
pub use crate::formatters::{
    EventFormatter, JsonFormatter, RecordFormatter, RenderedEvent, TextFormatter,
};

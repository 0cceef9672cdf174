//! Core facade types

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod log_level;
pub mod record;
pub mod state;
pub mod stream;
pub mod style;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{
    Configuration, ConfigureOptions, FormatterKind, FormatterSpec, HandlerSpec, LoggerDirective,
    NamedLoggerDirective, RootConfig, DEFAULT_DATEFMT, DEFAULT_FMT, ENV_MESSAGE_FORMAT,
};
pub use context::{ContextGuard, ContextRenderer, ContextVar, FieldValue};
pub use error::{ConfigError, Result};
pub use event::{EventDict, EVENT_KEY, EXC_INFO_KEY};
pub use log_level::LogLevel;
pub use record::{CallSite, LogRecord};
pub use state::{EventBuilder, LoggingState, StructLogger, TextLogger};
pub use stream::{SharedBuffer, StreamTarget};
pub use style::{
    resolve, resolve_for_stream, Style, ENV_FORCE_TEXT, ENV_FORCE_TEXT_COLOR,
    ENV_FORCE_TEXT_NO_COLOR,
};

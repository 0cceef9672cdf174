//! Configuration model
//!
//! [`ConfigureOptions`] is what callers hand to
//! [`LoggingState::configure`](super::state::LoggingState::configure);
//! [`Configuration`] is the tree the builder produces (or the caller
//! supplies wholesale) and the text-side loader consumes verbatim.

use super::context::ContextVar;
use super::log_level::LogLevel;
use super::stream::StreamTarget;
use super::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replaces the message pattern of any subsequent `configure()` call
pub const ENV_MESSAGE_FORMAT: &str = "UNILOG_MESSAGE_FORMAT";

/// Default message pattern.
///
/// Only brace-style placeholders are supported. The `context` field is
/// always present on a record (empty for the direct text path), which is
/// what lets one pattern serve both logging paths.
pub const DEFAULT_FMT: &str =
    "{asctime} {name:<15} {levelname:<7} ## {message}{context}{contextvars}    {module}.{function}:{lineno}";

/// Default timestamp pattern (chrono strftime syntax)
pub const DEFAULT_DATEFMT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Which record formatter a formatter spec constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    Text,
    ColoredText,
    Json,
}

/// Construction spec for one named formatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatterSpec {
    pub kind: FormatterKind,
    pub fmt: String,
    pub datefmt: String,
}

/// One named handler: a formatter reference plus the stream it writes to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerSpec {
    pub level: LogLevel,
    pub formatter: String,
    pub stream: StreamTarget,
}

/// Per-logger overrides, keyed by dotted logger name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerDirective {
    pub level: LogLevel,
}

/// List form of a per-logger override.
///
/// Exists solely because some configuration-loading contexts cannot express
/// dotted names as mapping keys; entries are folded into the mapping form
/// (overwriting on collision) before the tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLoggerDirective {
    pub name: String,
    pub level: LogLevel,
}

/// Root logger section of the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    pub level: LogLevel,
    pub handlers: Vec<String>,
}

/// The complete configuration tree handed to the text-side loader.
///
/// The loader validates references at load time; nothing validates the tree
/// beforehand, so a caller-supplied tree with a dangling formatter or
/// handler reference fails only when `configure()` runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub version: u32,
    pub disable_existing_loggers: bool,
    pub formatters: HashMap<String, FormatterSpec>,
    pub handlers: HashMap<String, HandlerSpec>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub loggers: HashMap<String, LoggerDirective>,
    pub root: RootConfig,
}

/// Fold the list form of per-logger overrides into the mapping form.
///
/// List entries win on name collision; no warning is emitted.
pub(crate) fn fold_logger_confs(
    logger_confs: HashMap<String, LoggerDirective>,
    logger_confs_list: Vec<NamedLoggerDirective>,
) -> HashMap<String, LoggerDirective> {
    let mut confs = logger_confs;
    for entry in logger_confs_list {
        confs.insert(entry.name, LoggerDirective { level: entry.level });
    }
    confs
}

/// Build the default single-handler tree for a resolved style
pub(crate) fn build_configuration(
    fmt: &str,
    datefmt: &str,
    loggers: HashMap<String, LoggerDirective>,
    style: Style,
    root_level: LogLevel,
    stream: StreamTarget,
) -> Configuration {
    let kind = match style {
        Style::Json => FormatterKind::Json,
        Style::TextColor => FormatterKind::ColoredText,
        // Auto/TextAuto never reach the builder; plain text is the safe fallback
        _ => FormatterKind::Text,
    };

    let mut formatters = HashMap::new();
    formatters.insert(
        "current".to_string(),
        FormatterSpec {
            kind,
            fmt: fmt.to_string(),
            datefmt: datefmt.to_string(),
        },
    );

    let mut handlers = HashMap::new();
    handlers.insert(
        "console".to_string(),
        HandlerSpec {
            level: LogLevel::Debug,
            formatter: "current".to_string(),
            stream,
        },
    );

    Configuration {
        version: 1,
        disable_existing_loggers: false,
        formatters,
        handlers,
        loggers,
        root: RootConfig {
            level: root_level,
            handlers: vec!["console".to_string()],
        },
    }
}

/// Options for [`LoggingState::configure`](super::state::LoggingState::configure).
///
/// # Example
///
/// ```
/// use unilog::prelude::*;
///
/// let state = LoggingState::new();
/// state
///     .configure(
///         ConfigureOptions::new()
///             .style(Style::TextNoColor)
///             .logger_conf("hyper", LogLevel::Warning)
///             .root_level(LogLevel::Debug),
///     )
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    pub(crate) style: Style,
    pub(crate) fmt: Option<String>,
    pub(crate) datefmt: Option<String>,
    pub(crate) logger_confs: HashMap<String, LoggerDirective>,
    pub(crate) logger_confs_list: Vec<NamedLoggerDirective>,
    pub(crate) cache_struct_loggers: bool,
    pub(crate) root_level: LogLevel,
    pub(crate) stream: StreamTarget,
    pub(crate) full_conf: Option<Configuration>,
    pub(crate) contextvars: Vec<ContextVar>,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            style: Style::Auto,
            fmt: None,
            datefmt: None,
            logger_confs: HashMap::new(),
            logger_confs_list: Vec::new(),
            cache_struct_loggers: true,
            root_level: LogLevel::Info,
            stream: StreamTarget::Stderr,
            full_conf: None,
            contextvars: Vec::new(),
        }
    }
}

impl ConfigureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a particular style instead of auto-detection
    #[must_use = "builder methods return a new value"]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Custom message pattern (brace placeholders only).
    ///
    /// Shortcut for changing the output quickly without supplying a full
    /// configuration tree.
    #[must_use = "builder methods return a new value"]
    pub fn fmt(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = Some(fmt.into());
        self
    }

    /// Custom timestamp pattern (chrono strftime syntax)
    #[must_use = "builder methods return a new value"]
    pub fn datefmt(mut self, datefmt: impl Into<String>) -> Self {
        self.datefmt = Some(datefmt.into());
        self
    }

    /// Minimum level for one named logger
    #[must_use = "builder methods return a new value"]
    pub fn logger_conf(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.logger_confs
            .insert(name.into(), LoggerDirective { level });
        self
    }

    /// Per-logger overrides, mapping form
    #[must_use = "builder methods return a new value"]
    pub fn logger_confs(mut self, confs: HashMap<String, LoggerDirective>) -> Self {
        self.logger_confs = confs;
        self
    }

    /// Per-logger overrides, list form (folded into the mapping before the
    /// tree is built; list entries win on name collision)
    #[must_use = "builder methods return a new value"]
    pub fn logger_confs_list(mut self, confs: Vec<NamedLoggerDirective>) -> Self {
        self.logger_confs_list = confs;
        self
    }

    /// Whether structured loggers are cached after first construction.
    ///
    /// Leave on except in environments that need fresh loggers per call,
    /// e.g. tests.
    #[must_use = "builder methods return a new value"]
    pub fn cache_struct_loggers(mut self, cache: bool) -> Self {
        self.cache_struct_loggers = cache;
        self
    }

    /// Minimum level of the root logger
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    /// Output stream (stderr by default). Useful for programmatic stream
    /// redirection in console scripts and for capturing output in tests.
    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: StreamTarget) -> Self {
        self.stream = stream;
        self
    }

    /// Supply a complete configuration tree, bypassing the builder.
    ///
    /// The tree is used verbatim; style and pattern options that only feed
    /// the builder are silently ignored in this mode.
    #[must_use = "builder methods return a new value"]
    pub fn full_conf(mut self, conf: Configuration) -> Self {
        self.full_conf = Some(conf);
        self
    }

    /// Context variables rendered into every record, on both logging paths
    #[must_use = "builder methods return a new value"]
    pub fn contextvars(mut self, vars: Vec<ContextVar>) -> Self {
        self.contextvars = vars;
        self
    }

    /// Add a single context variable
    #[must_use = "builder methods return a new value"]
    pub fn contextvar(mut self, var: ContextVar) -> Self {
        self.contextvars.push(var);
        self
    }
}

//! Logging state and the configuration entry point
//!
//! [`LoggingState`] owns the two subsystems the facade wires together: the
//! text-side runtime (per-logger levels, handler, record formatter) and the
//! structured-side runtime (event formatter, logger cache). There are no
//! hidden globals; tests construct isolated instances and the process entry
//! point owns the real one.

use super::config::{
    build_configuration, fold_logger_confs, Configuration, ConfigureOptions, FormatterKind,
    DEFAULT_DATEFMT, DEFAULT_FMT, ENV_MESSAGE_FORMAT,
};
use super::context::{ContextVar, FieldValue};
use super::error::{ConfigError, Result};
use super::event::{EventDict, EVENT_KEY, EXC_INFO_KEY};
use super::log_level::LogLevel;
use super::record::{CallSite, LogRecord};
use super::stream::StreamTarget;
use super::style::{self, Style};
use crate::formatters::{EventFormatter, RecordFormatter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Text-side runtime, rebuilt wholesale on every `configure()` call
struct TextRuntime {
    conf: Configuration,
    root_level: LogLevel,
    logger_levels: HashMap<String, LogLevel>,
    handler_level: LogLevel,
    formatter: RecordFormatter,
    stream: StreamTarget,
}

impl TextRuntime {
    /// Load a configuration tree, validating references as the classic
    /// dictionary-config loaders do: nothing is checked before this point.
    fn load(conf: Configuration, contextvars: Vec<ContextVar>) -> Result<Self> {
        if conf.version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: conf.version,
            });
        }
        if conf.root.handlers.is_empty() {
            return Err(ConfigError::NoHandlers);
        }
        for name in &conf.root.handlers {
            let handler = conf
                .handlers
                .get(name)
                .ok_or_else(|| ConfigError::unknown_handler(name.clone()))?;
            if !conf.formatters.contains_key(&handler.formatter) {
                return Err(ConfigError::unknown_formatter(
                    name.clone(),
                    handler.formatter.clone(),
                ));
            }
        }

        // Single output stream: the first root handler drives output.
        let handler = &conf.handlers[&conf.root.handlers[0]];
        let spec = &conf.formatters[&handler.formatter];
        let concrete = match spec.kind {
            FormatterKind::Text => Style::TextNoColor,
            FormatterKind::ColoredText => Style::TextColor,
            FormatterKind::Json => Style::Json,
        };
        let formatter =
            RecordFormatter::for_style(concrete, &spec.fmt, &spec.datefmt, contextvars)?;

        Ok(Self {
            root_level: conf.root.level,
            logger_levels: conf
                .loggers
                .iter()
                .map(|(name, directive)| (name.clone(), directive.level))
                .collect(),
            handler_level: handler.level,
            stream: handler.stream.clone(),
            formatter,
            conf,
        })
    }

    /// Walk the dotted logger hierarchy from most to least specific
    fn effective_level(&self, name: &str) -> LogLevel {
        let mut current = name;
        loop {
            if let Some(level) = self.logger_levels.get(current) {
                return *level;
            }
            match current.rfind('.') {
                Some(idx) => current = &current[..idx],
                None => break,
            }
        }
        self.root_level
    }
}

/// Structured-side runtime
struct StructRuntime {
    formatter: EventFormatter,
    cache_loggers: bool,
}

struct SharedState {
    text: RwLock<TextRuntime>,
    structured: RwLock<StructRuntime>,
    struct_loggers: RwLock<HashMap<String, StructLogger>>,
}

impl SharedState {
    fn enabled_for(&self, name: &str, level: LogLevel) -> bool {
        level >= self.text.read().effective_level(name)
    }

    fn emit(&self, record: &LogRecord, exc_info: Option<&str>) {
        let text = self.text.read();
        if record.level < text.handler_level {
            return;
        }
        let mut line = text.formatter.render(record);
        if let Some(trace) = exc_info {
            line.push('\n');
            line.push_str(trace);
        }
        text.stream.write_line(&line);
    }
}

/// Explicit logging state, the single configuration entry point.
///
/// Every call to [`configure`](Self::configure) rebuilds both runtimes from
/// scratch; nothing persists between calls except the state object itself.
/// Configuration is expected to happen from one control-flow path at a
/// time; the logging call paths on [`TextLogger`] and [`StructLogger`] are
/// safe from many threads once configured.
///
/// # Example
///
/// ```
/// use unilog::prelude::*;
///
/// let state = LoggingState::new();
/// state
///     .configure(ConfigureOptions::new().style(Style::TextNoColor))
///     .unwrap();
///
/// let logger = state.logger("app");
/// logger.info_event("started").field("port", 8080).log();
/// ```
pub struct LoggingState {
    shared: Arc<SharedState>,
}

impl LoggingState {
    /// Fresh state with the built-in defaults (plain text to stderr, root
    /// at INFO)
    pub fn new() -> Self {
        let conf = build_configuration(
            DEFAULT_FMT,
            DEFAULT_DATEFMT,
            HashMap::new(),
            Style::TextNoColor,
            LogLevel::Info,
            StreamTarget::Stderr,
        );
        let text = TextRuntime::load(conf, Vec::new()).expect("default configuration is valid");

        Self {
            shared: Arc::new(SharedState {
                text: RwLock::new(text),
                structured: RwLock::new(StructRuntime {
                    formatter: EventFormatter::new(false),
                    cache_loggers: true,
                }),
                struct_loggers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Configure both logging subsystems with sane defaults.
    ///
    /// Environment overrides are read fresh on every call, never cached:
    /// `UNILOG_MESSAGE_FORMAT` beats the `fmt` option, and the three
    /// style-forcing variables beat the `style` option.
    ///
    /// The structured side is reconfigured before the text side. The pair
    /// is best effort, not transactional: when loading the text-side tree
    /// fails, the structured side has already taken effect.
    pub fn configure(&self, options: ConfigureOptions) -> Result<()> {
        let actual = style::resolve_for_stream(options.style, &options.stream);
        let colored = actual == Style::TextColor;

        let fmt_env = std::env::var(ENV_MESSAGE_FORMAT)
            .ok()
            .filter(|value| !value.is_empty());
        let fmt = fmt_env
            .as_deref()
            .or(options.fmt.as_deref())
            .unwrap_or(DEFAULT_FMT);
        let datefmt = options.datefmt.as_deref().unwrap_or(DEFAULT_DATEFMT);

        let conf = match options.full_conf {
            Some(conf) => conf,
            None => build_configuration(
                fmt,
                datefmt,
                fold_logger_confs(options.logger_confs, options.logger_confs_list),
                actual,
                options.root_level,
                options.stream,
            ),
        };

        self.configure_structured(colored, options.cache_struct_loggers);
        self.configure_text(conf, options.contextvars)
    }

    fn configure_structured(&self, colored: bool, cache_loggers: bool) {
        {
            let mut structured = self.shared.structured.write();
            structured.formatter = EventFormatter::new(colored);
            structured.cache_loggers = cache_loggers;
        }
        if !cache_loggers {
            self.shared.struct_loggers.write().clear();
        }
    }

    fn configure_text(&self, conf: Configuration, contextvars: Vec<ContextVar>) -> Result<()> {
        let runtime = TextRuntime::load(conf, contextvars)?;
        if runtime.formatter.is_colored() {
            // The style resolver owns the color decision; forced color must
            // survive non-TTY streams, so take over the colored crate's
            // auto-detection. Never forced off: the plain and JSON
            // formatters simply do not emit color.
            colored::control::set_override(true);
        }
        *self.shared.text.write() = runtime;
        Ok(())
    }

    /// The configuration tree currently loaded into the text side
    pub fn configuration(&self) -> Configuration {
        self.shared.text.read().conf.clone()
    }

    /// A structured logger, cached after first construction unless caching
    /// was disabled
    pub fn logger(&self, name: &str) -> StructLogger {
        if self.shared.structured.read().cache_loggers {
            if let Some(cached) = self.shared.struct_loggers.read().get(name) {
                return cached.clone();
            }
            let logger = StructLogger {
                name: Arc::from(name),
                shared: Arc::downgrade(&self.shared),
            };
            self.shared
                .struct_loggers
                .write()
                .insert(name.to_string(), logger.clone());
            logger
        } else {
            StructLogger {
                name: Arc::from(name),
                shared: Arc::downgrade(&self.shared),
            }
        }
    }

    /// A classic text logger
    pub fn text_logger(&self, name: &str) -> TextLogger {
        TextLogger {
            name: Arc::from(name),
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl Default for LoggingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Classic text-logging handle.
///
/// Cheap to clone; outliving the [`LoggingState`] turns every call into a
/// silent no-op.
#[derive(Debug, Clone)]
pub struct TextLogger {
    name: Arc<str>,
    shared: Weak<SharedState>,
}

impl TextLogger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.dispatch(level, message.into(), None);
    }

    /// Log with call-site metadata; the logging macros route through this
    pub fn log_at(&self, level: LogLevel, message: impl Into<String>, site: CallSite) {
        self.dispatch(level, message.into(), Some(site));
    }

    fn dispatch(&self, level: LogLevel, message: String, site: Option<CallSite>) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        if !shared.enabled_for(&self.name, level) {
            return;
        }
        let mut record = LogRecord::new(self.name.as_ref(), level, message);
        if let Some(site) = site {
            record = record.with_call_site(site);
        }
        shared.emit(&record, None);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }
}

/// Structured-event logging handle.
///
/// Events carry a primary message plus an open set of named fields; the
/// event formatter flattens the fields and routes the result through the
/// same record path the text loggers use, so output stays uniform.
#[derive(Debug, Clone)]
pub struct StructLogger {
    name: Arc<str>,
    shared: Weak<SharedState>,
}

impl StructLogger {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start an event at an arbitrary level
    pub fn event(&self, level: LogLevel, message: impl Into<String>) -> EventBuilder {
        EventBuilder {
            logger: self.clone(),
            level,
            event: EventDict::new().with(EVENT_KEY, message.into()),
            site: None,
        }
    }

    pub fn debug_event(&self, message: impl Into<String>) -> EventBuilder {
        self.event(LogLevel::Debug, message)
    }

    pub fn info_event(&self, message: impl Into<String>) -> EventBuilder {
        self.event(LogLevel::Info, message)
    }

    pub fn warning_event(&self, message: impl Into<String>) -> EventBuilder {
        self.event(LogLevel::Warning, message)
    }

    pub fn error_event(&self, message: impl Into<String>) -> EventBuilder {
        self.event(LogLevel::Error, message)
    }

    pub fn critical_event(&self, message: impl Into<String>) -> EventBuilder {
        self.event(LogLevel::Critical, message)
    }

    /// Submit a raw event mapping.
    ///
    /// Severity filtering happens here, before the event formatter; the
    /// formatter is the terminal pipeline stage and only sees events that
    /// will actually be rendered.
    pub fn log_event(&self, level: LogLevel, event: EventDict, site: Option<CallSite>) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        if !shared.enabled_for(&self.name, level) {
            return;
        }

        let rendered = {
            let structured = shared.structured.read();
            structured.formatter.format(event)
        };

        let mut record = LogRecord::new(self.name.as_ref(), level, rendered.message)
            .with_context(rendered.context);
        if let Some(site) = site {
            record = record.with_call_site(site);
        }
        shared.emit(&record, rendered.exc_info.as_deref());
    }
}

/// Fluent builder for one structured event
#[must_use = "an event does nothing until .log() is called"]
pub struct EventBuilder {
    logger: StructLogger,
    level: LogLevel,
    event: EventDict,
    site: Option<CallSite>,
}

impl EventBuilder {
    /// Attach a named field
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.event.insert(key, value);
        self
    }

    /// Attach an exception/backtrace payload, rendered on its own line
    /// after the record
    pub fn exc_info(mut self, payload: impl Into<String>) -> Self {
        self.event.insert(EXC_INFO_KEY, payload.into());
        self
    }

    /// Attach call-site metadata
    pub fn location(mut self, site: CallSite) -> Self {
        self.site = Some(site);
        self
    }

    /// Submit the event
    pub fn log(self) {
        self.logger.log_event(self.level, self.event, self.site);
    }
}

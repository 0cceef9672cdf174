//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call-site metadata captured by the logging macros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub module: &'static str,
    pub function: &'static str,
    pub line: u32,
}

/// A single text-side log record.
///
/// Records reach the record formatter from two directions: the structured
/// path (which pre-renders the flattened event context into `context`) and
/// the direct text path (which leaves it empty). `context` is a plain
/// `String` rather than an `Option` so one format pattern works uniformly
/// for both; the "always present" guarantee holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub name: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub module: Option<String>,
    pub function: Option<String>,
    pub line: Option<u32>,
    pub context: String,
}

impl LogRecord {
    /// Sanitize the message to keep one record on one line.
    ///
    /// Newlines, carriage returns and tabs are replaced with escape
    /// sequences so a crafted message cannot forge additional records.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(name: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            module: None,
            function: None,
            line: None,
            context: String::new(),
        }
    }

    pub fn with_call_site(mut self, site: CallSite) -> Self {
        self.module = Some(site.module.to_string());
        self.function = Some(site.function.to_string());
        self.line = Some(site.line);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

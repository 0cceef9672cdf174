//! Record and event formatters

pub mod event;
pub mod json;
pub mod pattern;
pub mod text;

pub use event::{EventFormatter, RenderedEvent};
pub use json::JsonFormatter;
pub use pattern::Pattern;
pub use text::TextFormatter;

use crate::core::context::ContextVar;
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::style::Style;

/// Separator between the message block and appended context
pub const PADDING: &str = "    ";

/// The record-rendering strategy, selected once at configuration time.
///
/// A closed set of variants dispatched through one `render` call. There is
/// no name-to-formatter resolution at log time.
#[derive(Debug, Clone)]
pub enum RecordFormatter {
    PlainText(TextFormatter),
    Colored(TextFormatter),
    Json(JsonFormatter),
}

impl RecordFormatter {
    /// Build the strategy for a concrete style
    pub fn for_style(
        style: Style,
        fmt: &str,
        datefmt: &str,
        contextvars: Vec<ContextVar>,
    ) -> Result<Self> {
        Ok(match style {
            Style::Json => Self::Json(JsonFormatter::new(fmt, datefmt, contextvars)?),
            Style::TextColor => {
                Self::Colored(TextFormatter::new(fmt, datefmt, contextvars, true)?)
            }
            _ => Self::PlainText(TextFormatter::new(fmt, datefmt, contextvars, false)?),
        })
    }

    /// Render a record to its final output line
    pub fn render(&self, record: &LogRecord) -> String {
        match self {
            Self::PlainText(formatter) | Self::Colored(formatter) => formatter.format(record),
            Self::Json(formatter) => formatter.format(record),
        }
    }

    /// Whether this strategy emits ANSI color
    pub fn is_colored(&self) -> bool {
        matches!(self, Self::Colored(_))
    }
}

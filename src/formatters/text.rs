//! Text record formatter, plain and colored

use super::pattern::Pattern;
use super::PADDING;
use crate::core::context::{ContextRenderer, ContextVar};
use crate::core::error::Result;
use crate::core::log_level::LogLevel;
use crate::core::record::LogRecord;
use colored::Colorize;

/// Pattern-driven formatter for the text styles.
///
/// Both logging paths meet here: records from the structured path arrive
/// with their flattened event context already in `record.context`, direct
/// text records arrive with it empty. Either way the same pattern renders
/// the same field set; the colored variant only styles what the plain one
/// emits.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    pattern: Pattern,
    datefmt: String,
    contextvars: Vec<ContextVar>,
    renderer: ContextRenderer,
    colored: bool,
}

impl TextFormatter {
    pub fn new(
        fmt: &str,
        datefmt: &str,
        contextvars: Vec<ContextVar>,
        colored: bool,
    ) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::parse(fmt)?,
            datefmt: datefmt.to_string(),
            renderer: ContextRenderer::new(colored),
            contextvars,
            colored,
        })
    }

    /// Render a record to its final line
    pub fn format(&self, record: &LogRecord) -> String {
        // The contextvars field sits right after {context}: one space when a
        // flattened event context is already there, full padding otherwise,
        // so columns line up whichever fields are populated.
        let contextvars_field = if self.contextvars.is_empty() {
            String::new()
        } else {
            let rendered = self.renderer.render(&self.contextvars);
            let prefix = if record.context.is_empty() { PADDING } else { " " };
            format!("{}{}", prefix, rendered)
        };

        self.pattern.render_with(
            |field| self.field_value(field, record, &contextvars_field),
            |field, padded| self.stylize(field, padded, record.level),
        )
    }

    fn field_value(&self, field: &str, record: &LogRecord, contextvars_field: &str) -> String {
        match field {
            "asctime" => record.timestamp.format(&self.datefmt).to_string(),
            "name" => record.name.clone(),
            "levelname" => record.level.to_str().to_string(),
            "message" => record.message.clone(),
            "context" => record.context.clone(),
            "contextvars" => contextvars_field.to_string(),
            "module" => record.module.clone().unwrap_or_default(),
            "function" => record.function.clone().unwrap_or_default(),
            "lineno" => record.line.map(|l| l.to_string()).unwrap_or_default(),
            // unknown names are rejected at parse time
            _ => String::new(),
        }
    }

    fn stylize(&self, field: &str, value: String, level: LogLevel) -> String {
        if !self.colored {
            return value;
        }
        match field {
            "asctime" => value.green().to_string(),
            "name" => value.blue().to_string(),
            "levelname" => value.color(level.color_code()).to_string(),
            // source location is secondary information
            "module" | "function" | "lineno" => value.white().dimmed().to_string(),
            _ => value,
        }
    }
}

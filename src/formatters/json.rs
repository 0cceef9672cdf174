//! JSON record formatter

use super::pattern::Pattern;
use crate::core::context::{ContextRenderer, ContextVar};
use crate::core::error::Result;
use crate::core::record::LogRecord;

/// Renders records as one JSON object per line.
///
/// The same brace pattern as the text formatter decides which fields the
/// object carries; the severity is additionally duplicated under the
/// `severity` key, which is the field name log aggregators key on.
/// Context variables are rendered with coloring forced off; JSON output
/// must never contain ANSI escapes.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pattern: Pattern,
    datefmt: String,
    contextvars: Vec<ContextVar>,
    renderer: ContextRenderer,
}

impl JsonFormatter {
    pub fn new(fmt: &str, datefmt: &str, contextvars: Vec<ContextVar>) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::parse(fmt)?,
            datefmt: datefmt.to_string(),
            contextvars,
            renderer: ContextRenderer::new(false),
        })
    }

    /// Render a record as a single-line JSON object
    pub fn format(&self, record: &LogRecord) -> String {
        let mut object = serde_json::Map::new();

        for field in self.pattern.field_names() {
            object.insert(field.to_string(), self.json_value(field, record));
        }

        // Aggregator compatibility: severity must be present under exactly
        // this key, whatever the pattern says.
        object.insert(
            "severity".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );

        serde_json::to_string(&serde_json::Value::Object(object)).unwrap_or_default()
    }

    fn json_value(&self, field: &str, record: &LogRecord) -> serde_json::Value {
        use serde_json::Value;
        match field {
            "asctime" => Value::String(record.timestamp.format(&self.datefmt).to_string()),
            "name" => Value::String(record.name.clone()),
            "levelname" => Value::String(record.level.to_str().to_string()),
            "message" => Value::String(record.message.clone()),
            "context" => Value::String(record.context.clone()),
            "contextvars" => Value::String(self.renderer.render(&self.contextvars)),
            "module" => Value::String(record.module.clone().unwrap_or_default()),
            "function" => Value::String(record.function.clone().unwrap_or_default()),
            "lineno" => record
                .line
                .map(|l| Value::Number(l.into()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

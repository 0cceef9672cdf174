//! Event formatter: terminal stage of the structured-event pipeline
//!
//! Flattens the open field mapping of a structured event into a single
//! `key=value ...` context string and hands the result to the record path.
//! Key/value pairs are deliberately flattened into a flat string rather
//! than kept as separate fields: the fields are highly dynamic, and a flat
//! string reads well both locally and in aggregated logs.

use super::PADDING;
use crate::core::context::ContextRenderer;
use crate::core::event::{EventDict, EVENT_KEY, EXC_INFO_KEY};

/// Output of the event formatter, ready for the record path
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEvent {
    /// Primary message, coerced to a string
    pub message: String,
    /// Exception/backtrace payload, passed through untouched
    pub exc_info: Option<String>,
    /// Flattened `key=value` context, with leading padding when non-empty
    pub context: String,
}

/// Flattens structured events into renderable message/context pairs
#[derive(Debug, Clone, Default)]
pub struct EventFormatter {
    renderer: ContextRenderer,
}

impl EventFormatter {
    pub fn new(color: bool) -> Self {
        Self {
            renderer: ContextRenderer::new(color),
        }
    }

    /// Render an event.
    ///
    /// The reserved `event` key holds the primary message and may be
    /// non-string; it is coerced via its display form, never quoted. The
    /// reserved `exc_info` key is carried through and never flattened into
    /// the context. Remaining fields flatten in insertion order.
    pub fn format(&self, mut event: EventDict) -> RenderedEvent {
        let message = event
            .remove(EVENT_KEY)
            .map(|value| value.to_string())
            .unwrap_or_default();

        let exc_info = event.get(EXC_INFO_KEY).map(|value| value.to_string());

        let flattened: Vec<String> = event
            .iter()
            .filter(|(key, _)| *key != EXC_INFO_KEY)
            .map(|(key, value)| self.renderer.format_item(key, value))
            .collect();
        let mut context = flattened.join(" ");
        if !context.is_empty() {
            context.insert_str(0, PADDING);
        }

        RenderedEvent {
            message,
            exc_info,
            context,
        }
    }
}

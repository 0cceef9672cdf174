//! Ambient context variables and their renderer
//!
//! This module provides:
//! - `FieldValue`: the closed value type for structured fields
//! - `ContextVar`: a named, thread-scoped slot that may or may not hold a value
//! - `ContextGuard`: RAII guard restoring the previous value on scope exit
//! - `ContextRenderer`: pure `name=value` rendering, optionally colorized

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Debug-style representation: strings are quoted, everything else is
    /// rendered bare. Context tokens use this; the event message does not.
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            FieldValue::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    // Active values keyed by variable id. Thread is the isolation unit;
    // values never leak to other threads.
    static ACTIVE_VALUES: RefCell<HashMap<u64, FieldValue>> = RefCell::new(HashMap::new());
}

/// A named, thread-scoped context variable.
///
/// A `ContextVar` is a slot that may or may not currently hold a value.
/// Lookup is fallible by design: "not set" is an expected outcome, distinct
/// from holding an empty value. Values are installed for a lexical scope via
/// [`ContextVar::set`], which returns a guard restoring the previous state
/// on drop.
///
/// Clones share the same slot, so a variable can be handed both to
/// `configure()` and to the request-handling code that sets it.
///
/// # Example
///
/// ```
/// use unilog::core::ContextVar;
///
/// let request_id = ContextVar::new("request_id");
/// assert!(request_id.get().is_none());
///
/// {
///     let _guard = request_id.set("abc");
///     assert!(request_id.get().is_some());
/// }
/// // previous (unset) state restored here
/// assert!(request_id.get().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ContextVar {
    id: u64,
    name: Arc<str>,
}

impl ContextVar {
    /// Create a new variable with no value set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name.into()),
        }
    }

    /// The variable's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value on this thread, or `None` when not set
    pub fn get(&self) -> Option<FieldValue> {
        ACTIVE_VALUES.with(|values| values.borrow().get(&self.id).cloned())
    }

    /// Install a value for the current scope.
    ///
    /// The returned guard restores the previous value (or the unset state)
    /// when dropped.
    #[must_use = "dropping the guard immediately reverts the value"]
    pub fn set(&self, value: impl Into<FieldValue>) -> ContextGuard {
        let previous = ACTIVE_VALUES
            .with(|values| values.borrow_mut().insert(self.id, value.into()));
        ContextGuard {
            id: self.id,
            previous,
        }
    }
}

/// RAII guard for a scoped context value.
///
/// When dropped, restores whatever the variable held before the
/// corresponding [`ContextVar::set`] call.
pub struct ContextGuard {
    id: u64,
    previous: Option<FieldValue>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        ACTIVE_VALUES.with(|values| {
            let mut values = values.borrow_mut();
            match self.previous.take() {
                Some(prev) => values.insert(self.id, prev),
                None => values.remove(&self.id),
            }
        });
    }
}

const KEY_COLOR: Color = Color::Cyan;
const VALUE_COLOR: Color = Color::Magenta;

/// Renders context variables and event fields as `name=value` tokens.
///
/// Keys and values get two fixed, distinct colors when coloring is on.
/// Rendering is pure: variables are only read, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ContextRenderer {
    color: bool,
}

impl ContextRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Format a single `key=value` token, value in debug representation
    pub fn format_item(&self, key: &str, value: &FieldValue) -> String {
        if self.color {
            format!(
                "{}={}",
                key.color(KEY_COLOR),
                value.repr().color(VALUE_COLOR)
            )
        } else {
            format!("{}={}", key, value.repr())
        }
    }

    /// Render all currently-set variables, space-joined.
    ///
    /// Unset variables are skipped silently; the result is empty when no
    /// variable holds a value.
    pub fn render(&self, vars: &[ContextVar]) -> String {
        let items: Vec<String> = vars
            .iter()
            .filter_map(|var| var.get().map(|value| self.format_item(var.name(), &value)))
            .collect();
        items.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_lookup_is_none() {
        let var = ContextVar::new("request_id");
        assert_eq!(var.get(), None);
    }

    #[test]
    fn test_set_and_restore() {
        let var = ContextVar::new("request_id");
        {
            let _guard = var.set("abc");
            assert_eq!(var.get(), Some(FieldValue::String("abc".to_string())));
        }
        assert_eq!(var.get(), None);
    }

    #[test]
    fn test_nested_set_restores_previous() {
        let var = ContextVar::new("user");
        let _outer = var.set("alice");
        {
            let _inner = var.set("bob");
            assert_eq!(var.get(), Some(FieldValue::String("bob".to_string())));
        }
        assert_eq!(var.get(), Some(FieldValue::String("alice".to_string())));
    }

    #[test]
    fn test_empty_value_is_present() {
        let var = ContextVar::new("flag");
        let _guard = var.set("");
        // present-but-empty is not the same as unset
        assert_eq!(var.get(), Some(FieldValue::String(String::new())));
    }

    #[test]
    fn test_clones_share_slot() {
        let var = ContextVar::new("shared");
        let alias = var.clone();
        let _guard = var.set(7);
        assert_eq!(alias.get(), Some(FieldValue::Int(7)));
    }

    #[test]
    fn test_values_do_not_leak_across_threads() {
        let var = ContextVar::new("request_id");
        let _guard = var.set("outer");

        let other = var.clone();
        std::thread::spawn(move || {
            assert_eq!(other.get(), None);
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_render_empty() {
        let renderer = ContextRenderer::new(false);
        assert_eq!(renderer.render(&[]), "");

        let unset = ContextVar::new("ghost");
        assert_eq!(renderer.render(&[unset]), "");
    }

    #[test]
    fn test_render_single_string_value() {
        let var = ContextVar::new("request_id");
        let _guard = var.set("abc");

        let renderer = ContextRenderer::new(false);
        assert_eq!(renderer.render(std::slice::from_ref(&var)), "request_id=\"abc\"");
    }

    #[test]
    fn test_render_skips_unset_and_joins_with_space() {
        let a = ContextVar::new("a");
        let b = ContextVar::new("b");
        let c = ContextVar::new("c");
        let _ga = a.set(1);
        let _gc = c.set(true);

        let renderer = ContextRenderer::new(false);
        assert_eq!(renderer.render(&[a, b, c]), "a=1 c=true");
    }

    #[test]
    fn test_colored_tokens_wrap_key_and_value_separately() {
        colored::control::set_override(true);
        let renderer = ContextRenderer::new(true);
        let item = renderer.format_item("k", &FieldValue::Int(3));
        // cyan key, magenta value, '=' left uncolored
        assert!(item.contains("\x1b[36m"));
        assert!(item.contains("\x1b[35m"));
        assert!(item.contains('='));
    }

    #[test]
    fn test_repr_quotes_strings_only() {
        assert_eq!(FieldValue::from("bob").repr(), "\"bob\"");
        assert_eq!(FieldValue::from(3).repr(), "3");
        assert_eq!(FieldValue::from(true).repr(), "true");
        assert_eq!(FieldValue::Null.repr(), "null");
    }

    #[test]
    fn test_json_value_conversion() {
        assert_eq!(
            FieldValue::from("bob").to_json_value(),
            serde_json::Value::String("bob".to_string())
        );
        assert_eq!(FieldValue::from(3).to_json_value(), serde_json::json!(3));
        assert_eq!(FieldValue::Null.to_json_value(), serde_json::Value::Null);
        // NaN has no JSON representation
        assert_eq!(
            FieldValue::Float(f64::NAN).to_json_value(),
            serde_json::Value::Null
        );
    }
}

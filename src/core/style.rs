//! Output style selection
//!
//! The facade renders either JSON, colored text, or plain text. Which one
//! applies is decided here, from environment overrides, an explicit request,
//! or terminal-capability probing, in that order.

use super::stream::StreamTarget;
use serde::{Deserialize, Serialize};

/// Force colored text output regardless of request or terminal
pub const ENV_FORCE_TEXT_COLOR: &str = "UNILOG_FORCE_TEXT_COLOR";
/// Force uncolored text output regardless of request or terminal
pub const ENV_FORCE_TEXT_NO_COLOR: &str = "UNILOG_FORCE_TEXT_NO_COLOR";
/// Force text output, color decided by terminal capability
pub const ENV_FORCE_TEXT: &str = "UNILOG_FORCE_TEXT";

/// Output style.
///
/// `Auto` and `TextAuto` are requests, not answers: they are resolved to one
/// of the three concrete styles before any formatter is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Pick JSON or text from terminal capability (default)
    #[default]
    Auto,
    /// Text for sure, color still decided by terminal capability
    TextAuto,
    /// One JSON object per line
    Json,
    /// Text with ANSI coloring
    TextColor,
    /// Text without coloring
    TextNoColor,
}

impl Style {
    /// Whether this style can be used directly, without resolution
    pub fn is_concrete(&self) -> bool {
        matches!(self, Style::Json | Style::TextColor | Style::TextNoColor)
    }
}

/// True when the variable is present with a non-empty value.
///
/// The three style variables are presence switches; their content is never
/// parsed.
fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
}

/// Resolve a requested style to a concrete one.
///
/// `interactive` is the outcome of probing the output stream: `None` means
/// the stream cannot report interactivity and is treated as non-interactive.
///
/// Precedence, highest first:
/// 1. `UNILOG_FORCE_TEXT_COLOR` / `UNILOG_FORCE_TEXT_NO_COLOR` /
///    `UNILOG_FORCE_TEXT`. The environment always wins, even over an explicit
///    concrete request. This is the escape hatch for container and CI
///    environments and must stay that way.
/// 2. An already-concrete `requested` style.
/// 3. Terminal capability: text when interactive or text was forced,
///    colored iff interactive; JSON otherwise.
pub fn resolve(requested: Style, interactive: Option<bool>) -> Style {
    let mut style = requested;
    if env_flag(ENV_FORCE_TEXT_COLOR) {
        style = Style::TextColor;
    } else if env_flag(ENV_FORCE_TEXT_NO_COLOR) {
        style = Style::TextNoColor;
    } else if env_flag(ENV_FORCE_TEXT) {
        style = Style::TextAuto;
    }

    if style.is_concrete() {
        return style;
    }

    let isatty = interactive.unwrap_or(false);
    let force_text = style == Style::TextAuto;
    let use_json = !(isatty || force_text);
    let colored = isatty && !use_json;

    if use_json {
        Style::Json
    } else if colored {
        Style::TextColor
    } else {
        Style::TextNoColor
    }
}

/// Resolve against an actual output stream, probing its interactivity
pub fn resolve_for_stream(requested: Style, stream: &StreamTarget) -> Style {
    resolve(requested, stream.is_interactive())
}

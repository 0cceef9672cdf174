//! Brace-style message patterns
//!
//! The single placeholder syntax shared by the text and JSON formatters:
//! `{field}` substitutes a record field, `{field:<15}` / `{field:>7}` /
//! `{field:^9}` additionally pads to a width, `{{` and `}}` escape literal
//! braces. No other placeholder syntax is supported.
//!
//! Patterns are parsed and validated once, at configuration-load time;
//! rendering afterwards cannot fail.

use crate::core::error::{ConfigError, Result};

/// Fields a record can substitute into a pattern
pub const KNOWN_FIELDS: &[&str] = &[
    "asctime",
    "name",
    "levelname",
    "message",
    "context",
    "contextvars",
    "module",
    "function",
    "lineno",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field {
        name: String,
        align: Align,
        width: usize,
    },
}

/// A parsed, validated message pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse and validate a pattern string
    pub fn parse(fmt: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = fmt.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' => {
                    if let Some((_, '{')) = chars.peek() {
                        chars.next();
                        literal.push('{');
                        continue;
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let mut inner = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(ConfigError::pattern(format!(
                            "unclosed '{{' at byte {}",
                            pos
                        )));
                    }
                    segments.push(Self::parse_field(&inner)?);
                }
                '}' => {
                    if let Some((_, '}')) = chars.peek() {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(ConfigError::pattern(format!(
                            "single '}}' at byte {}",
                            pos
                        )));
                    }
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    fn parse_field(inner: &str) -> Result<Segment> {
        let (name, spec) = match inner.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (inner, None),
        };

        if name.is_empty() {
            return Err(ConfigError::pattern("empty field name"));
        }
        if !KNOWN_FIELDS.contains(&name) {
            return Err(ConfigError::unknown_field(name));
        }

        let (align, width) = match spec {
            None => (Align::Left, 0),
            Some(spec) => {
                let (align, digits) = match spec.chars().next() {
                    Some('<') => (Align::Left, &spec[1..]),
                    Some('>') => (Align::Right, &spec[1..]),
                    Some('^') => (Align::Center, &spec[1..]),
                    _ => (Align::Left, spec),
                };
                let width: usize = digits.parse().map_err(|_| {
                    ConfigError::pattern(format!("bad format spec '{}' for '{}'", spec, name))
                })?;
                (align, width)
            }
        };

        Ok(Segment::Field {
            name: name.to_string(),
            align,
            width,
        })
    }

    /// Names of the fields this pattern substitutes, in order of appearance
    pub fn field_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Field { name, .. } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute fields via `resolve`
    pub fn render<R>(&self, resolve: R) -> String
    where
        R: Fn(&str) -> String,
    {
        self.render_with(resolve, |_, value| value)
    }

    /// Substitute fields via `resolve`, passing each padded value through
    /// `style` afterwards.
    ///
    /// Padding happens before styling so ANSI wrapping never breaks column
    /// widths.
    pub fn render_with<R, S>(&self, resolve: R, style: S) -> String
    where
        R: Fn(&str) -> String,
        S: Fn(&str, String) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { name, align, width } => {
                    let value = resolve(name);
                    let padded = if *width > 0 {
                        match align {
                            Align::Left => format!("{:<w$}", value, w = width),
                            Align::Right => format!("{:>w$}", value, w = width),
                            Align::Center => format!("{:^w$}", value, w = width),
                        }
                    } else {
                        value
                    };
                    out.push_str(&style(name, padded));
                }
            }
        }
        out
    }
}

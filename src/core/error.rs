//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures surfaced while loading a logging configuration.
///
/// These only occur inside [`configure`](crate::core::state::LoggingState::configure);
/// the logging call paths themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration tree carries a version marker other than 1
    #[error("Unsupported configuration version {found} (expected 1)")]
    UnsupportedVersion { found: u32 },

    /// Handler references a formatter name missing from the tree
    #[error("Handler '{handler}' references unknown formatter '{formatter}'")]
    UnknownFormatter { handler: String, formatter: String },

    /// Root logger references a handler name missing from the tree
    #[error("Root logger references unknown handler '{name}'")]
    UnknownHandler { name: String },

    /// Root logger has an empty handler list
    #[error("Root logger has no handlers")]
    NoHandlers,

    /// Malformed message pattern (unclosed brace, bad alignment spec, ...)
    #[error("Invalid message pattern: {message}")]
    Pattern { message: String },

    /// Message pattern names a field the record does not carry
    #[error("Message pattern references unknown field '{name}'")]
    UnknownField { name: String },
}

impl ConfigError {
    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        ConfigError::Pattern {
            message: message.into(),
        }
    }

    /// Create an unknown-formatter error
    pub fn unknown_formatter(handler: impl Into<String>, formatter: impl Into<String>) -> Self {
        ConfigError::UnknownFormatter {
            handler: handler.into(),
            formatter: formatter.into(),
        }
    }

    /// Create an unknown-handler error
    pub fn unknown_handler(name: impl Into<String>) -> Self {
        ConfigError::UnknownHandler { name: name.into() }
    }

    /// Create an unknown-field error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        ConfigError::UnknownField { name: name.into() }
    }
}

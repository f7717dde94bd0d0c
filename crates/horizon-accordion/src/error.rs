//! Error types for the accordion widget.
//!
//! The reconciliation engine itself never fails: lookups return `None` and
//! vetoed operations return `false`. Errors only arise where external input
//! enters the widget, i.e. configuration.

/// Result type alias for accordion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration document could not be parsed.
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// The configuration could not be written out.
    #[error("Failed to serialize {format} configuration: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },

    /// A configuration value was well-formed but not acceptable.
    #[error("Invalid value for '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create a parse error.
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}

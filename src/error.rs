//! Structured error types for configuration resolution.

use std::fmt;
use std::path::PathBuf;

/// Value tag a typed accessor expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
    Number,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "a string"),
            ValueKind::Integer => write!(f, "an integer"),
            ValueKind::Boolean => write!(f, "a boolean"),
            ValueKind::Number => write!(f, "a number"),
        }
    }
}

/// Errors raised while loading or reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured value has the wrong tag for the requested accessor.
    #[error("Expected config value {key} to be {expected}")]
    TypeMismatch { key: String, expected: ValueKind },

    /// A structured key is present but does not have the required shape.
    #[error("config {key} {reason}")]
    Schema { key: String, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse json from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {} must contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

impl ConfigError {
    pub fn type_mismatch(key: &str, expected: ValueKind) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }

    pub fn schema(key: &str, reason: impl Into<String>) -> Self {
        Self::Schema {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Unwrap a configuration result or terminate the process.
///
/// Ambiguous configuration must not run: a value of the wrong type is
/// reported on stderr and through `tracing`, then the process aborts.
/// Accessors return [`ConfigResult`] so they stay testable in-process; only
/// service entry points call this.
pub fn exit_on_mismatch<T>(result: ConfigResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "fatal configuration error");
            eprintln!("fatal: {err}");
            std::process::abort();
        }
    }
}

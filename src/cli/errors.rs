//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status after the error
//! response has been written.

use std::fmt;
use std::io;

use crate::schema::{SchemaError, Violation};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Registry construction or lookup failed
    RegistryError,
    /// Document failed validation
    DocumentRejected,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::IoError => "CLI_IO_ERROR",
            Self::RegistryError => "CLI_REGISTRY_ERROR",
            Self::DocumentRejected => "CLI_DOCUMENT_REJECTED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    violations: Vec<Violation>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level violations when a document was rejected
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::Validation(err) => Self {
                code: CliErrorCode::DocumentRejected,
                message: format!(
                    "{} field(s) rejected by collection '{}'",
                    err.violations.len(),
                    err.collection
                ),
                violations: err.violations,
            },
            other => Self::new(
                CliErrorCode::RegistryError,
                format!("{}: {}", other.code(), other),
            ),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationError;

    #[test]
    fn test_rejection_keeps_violations() {
        let err: CliError = SchemaError::Validation(ValidationError {
            collection: "booking".into(),
            violations: vec![Violation::missing_field("date")],
        })
        .into();
        assert_eq!(err.code(), CliErrorCode::DocumentRejected);
        assert_eq!(err.violations().len(), 1);
        assert!(err.message().contains("booking"));
    }

    #[test]
    fn test_registry_error_carries_schema_code() {
        let err: CliError = SchemaError::UnknownCollection("blogs".into()).into();
        assert_eq!(err.code_str(), "CLI_REGISTRY_ERROR");
        assert!(err.message().contains("SCHEMA_UNKNOWN_COLLECTION"));
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad log level");
        assert_eq!(err.to_string(), "CLI_CONFIG_ERROR: bad log level");
    }
}

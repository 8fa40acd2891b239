//! Schema error types
//!
//! Registry error codes:
//! - SCHEMA_UNKNOWN_COLLECTION
//! - SCHEMA_VALIDATION_FAILED
//! - SCHEMA_DUPLICATE_COLLECTION
//! - SCHEMA_MALFORMED
//! - SCHEMA_INVALID_OVERRIDE
//! - SCHEMA_DECODE_FAILED
//!
//! Violation codes (one per rejected field):
//! - MISSING_REQUIRED_FIELD
//! - TYPE_MISMATCH
//! - OUT_OF_RANGE
//! - MALFORMED_FORMAT
//! - STRING_TOO_SHORT

use serde::Serialize;
use serde_json::Number;
use thiserror::Error;

/// Reason a single field failed validation
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    #[error("field is required")]
    MissingRequiredField,

    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{}", range_message(.ge, .le, .actual))]
    OutOfRange {
        #[serde(skip_serializing_if = "Option::is_none")]
        ge: Option<Number>,
        #[serde(skip_serializing_if = "Option::is_none")]
        le: Option<Number>,
        actual: Number,
    },

    #[error("value is not a valid {format}")]
    MalformedFormat { format: &'static str },

    #[error("must be at least {min_length} characters, got {actual_length}")]
    StringTooShort {
        min_length: usize,
        actual_length: usize,
    },
}

fn range_message(ge: &Option<Number>, le: &Option<Number>, actual: &Number) -> String {
    match (ge, le) {
        (Some(ge), Some(le)) => format!("value {} is outside [{}, {}]", actual, ge, le),
        (Some(ge), None) => format!("value {} is less than {}", actual, ge),
        (None, Some(le)) => format!("value {} is greater than {}", actual, le),
        (None, None) => format!("value {} is out of range", actual),
    }
}

impl ViolationKind {
    /// Returns the machine-readable violation code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ViolationKind::TypeMismatch { .. } => "TYPE_MISMATCH",
            ViolationKind::OutOfRange { .. } => "OUT_OF_RANGE",
            ViolationKind::MalformedFormat { .. } => "MALFORMED_FORMAT",
            ViolationKind::StringTooShort { .. } => "STRING_TOO_SHORT",
        }
    }
}

/// One reported reason a document failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field name, or `$root` when the document itself is malformed
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
    message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        let message = kind.to_string();
        Self {
            field: field.into(),
            kind,
            message,
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::MissingRequiredField)
    }

    /// Human-readable reason, suitable for showing to an end user
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Every violation found in one document
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("document rejected by collection '{collection}': {}", join_violations(.violations))]
pub struct ValidationError {
    pub collection: String,
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Names of the rejected fields, in report order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    /// Returns the violations reported against one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Whether `field` was rejected with the given violation code
    pub fn has(&self, field: &str, code: &str) -> bool {
        self.for_field(field).any(|v| v.code() == code)
    }
}

/// Registry-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("no schema registered for collection '{0}'")]
    UnknownCollection(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("collection '{collection}' is already bound to schema '{existing}'")]
    DuplicateCollection { collection: String, existing: String },

    #[error("malformed schema '{origin}': {reason}")]
    MalformedSchema { origin: String, reason: String },

    #[error("invalid collection override: {0}")]
    InvalidOverride(String),

    #[error("validated document for '{collection}' does not decode: {reason}")]
    Decode { collection: String, reason: String },
}

impl SchemaError {
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedSchema {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Returns the machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownCollection(_) => "SCHEMA_UNKNOWN_COLLECTION",
            SchemaError::Validation(_) => "SCHEMA_VALIDATION_FAILED",
            SchemaError::DuplicateCollection { .. } => "SCHEMA_DUPLICATE_COLLECTION",
            SchemaError::MalformedSchema { .. } => "SCHEMA_MALFORMED",
            SchemaError::InvalidOverride(_) => "SCHEMA_INVALID_OVERRIDE",
            SchemaError::Decode { .. } => "SCHEMA_DECODE_FAILED",
        }
    }

    /// Returns the field-level report when the error is a rejected document
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SchemaError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

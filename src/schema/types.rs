//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point (accepts any JSON number)
//! - bool: Boolean
//! - date: calendar date, `YYYY-MM-DD`
//! - time: time of day, `HH:MM[:SS[.fff]]`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Calendar date
    Date,
    /// Time of day
    Time,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
            FieldType::Time => "time",
        }
    }

    /// Whether numeric bounds apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Int | FieldType::Float)
    }
}

/// Textual formats a string field may be required to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    /// RFC 5322-style address, checked syntactically only
    Email,
}

impl StringFormat {
    pub fn name(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
        }
    }
}

/// Per-field constraint metadata.
///
/// Bounds are inclusive. Length rules count Unicode scalar values and are
/// checked after trimming when `strip_whitespace` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strip_whitespace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Constraints {
    fn has_string_rules(&self) -> bool {
        self.min_length.is_some() || self.strip_whitespace || self.format.is_some()
    }

    fn has_numeric_rules(&self) -> bool {
        self.ge.is_some() || self.le.is_some()
    }
}

/// Field specification: one entry of a schema's constraint table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in documents
    pub name: String,
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
    /// Value filled in when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub constraints: Constraints,
}

impl FieldSpec {
    fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            default: None,
            description: None,
            constraints: Constraints::default(),
        }
    }

    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, true)
    }

    /// Create an optional string field
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, false)
    }

    /// Create a required int field
    pub fn required_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, true)
    }

    /// Create an optional int field
    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, false)
    }

    /// Create a required float field
    pub fn required_float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float, true)
    }

    /// Create an optional bool field with a default value
    pub fn bool_with_default(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, FieldType::Bool, false).with_default(Value::Bool(default))
    }

    /// Create a required date field
    pub fn required_date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date, true)
    }

    /// Create a required time field
    pub fn required_time(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Time, true)
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inclusive lower bound
    pub fn at_least(mut self, ge: impl Into<Number>) -> Self {
        self.constraints.ge = Some(ge.into());
        self
    }

    /// Inclusive upper bound
    pub fn at_most(mut self, le: impl Into<Number>) -> Self {
        self.constraints.le = Some(le.into());
        self
    }

    /// Inclusive range `[ge, le]`
    pub fn in_range(self, ge: impl Into<Number>, le: impl Into<Number>) -> Self {
        self.at_least(ge).at_most(le)
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.constraints.min_length = Some(min_length);
        self
    }

    /// Strip leading and trailing whitespace before other string checks
    pub fn trimmed(mut self) -> Self {
        self.constraints.strip_whitespace = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.constraints.format = Some(StringFormat::Email);
        self
    }

    /// Optional field without a default; accepts `null` as "unset".
    pub fn is_nullable(&self) -> bool {
        !self.required && self.default.is_none()
    }
}

/// Complete schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Declared schema name, e.g. `ContactMessage`
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field specifications in declaration order
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rewrites each default into its normalized stored form: trimmed,
    /// lowercased email domain, canonical date and time layouts.
    pub(crate) fn normalize_defaults(&mut self) {
        for field in &mut self.fields {
            if let Some(default) = &field.default {
                if let Ok(normalized) = super::validator::check_value(field, default) {
                    field.default = Some(normalized);
                }
            }
        }
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Schema name must not be empty".into());
        }
        if self.fields.is_empty() {
            return Err(format!("Schema '{}' declares no fields", self.name));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("Field name must not be empty".into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Field '{}' is declared twice", field.name));
            }
            validate_field_structure(field)?;
        }

        Ok(())
    }
}

fn validate_field_structure(field: &FieldSpec) -> Result<(), String> {
    let c = &field.constraints;

    if c.has_numeric_rules() && !field.field_type.is_numeric() {
        return Err(format!(
            "Field '{}': numeric bounds on a {} field",
            field.name,
            field.field_type.type_name()
        ));
    }
    if c.has_string_rules() && field.field_type != FieldType::String {
        return Err(format!(
            "Field '{}': string rules on a {} field",
            field.name,
            field.field_type.type_name()
        ));
    }
    if let (Some(ge), Some(le)) = (&c.ge, &c.le) {
        if let (Some(lo), Some(hi)) = (ge.as_f64(), le.as_f64()) {
            if lo > hi {
                return Err(format!("Field '{}': ge {} exceeds le {}", field.name, ge, le));
            }
        }
    }

    if let Some(default) = &field.default {
        if field.required {
            return Err(format!("Field '{}': required field declares a default", field.name));
        }
        let probe = super::validator::check_value(field, default);
        if let Err(kind) = probe {
            return Err(format!("Field '{}': default rejected: {}", field.name, kind));
        }
    }

    Ok(())
}

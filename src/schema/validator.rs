//! Schema validator for document validation
//!
//! Validation semantics:
//! - Every required field is present
//! - Present fields match their declared type exactly (no coercion)
//! - Numeric bounds are inclusive; violations are reported, never clamped
//! - Strings with a trim rule are trimmed before their length check
//! - Absent optional fields take their declared default, if any
//! - `null` is accepted only for optional fields without a default
//! - Undeclared fields are dropped from the normalized document
//!
//! Every violation in a document is collected before returning.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde_json::{Map, Number, Value};

use super::errors::{SchemaResult, ValidationError, Violation, ViolationKind};
use super::registry::SchemaRegistry;
use super::types::{FieldSpec, FieldType, Schema, StringFormat};

/// Accepted date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Canonical time layout; fractional seconds are printed only when non-zero
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIME_FORMAT_SHORT: &str = "%H:%M";

const MAX_EMAIL_LEN: usize = 254;
const MAX_EMAIL_LOCAL_LEN: usize = 64;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    ))
    .expect("email regex is invalid")
});

/// A document that passed validation, with defaults applied and values
/// normalized (trimmed strings, canonical dates and times).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument {
    collection: String,
    fields: Map<String, Value>,
    defaults_applied: Vec<String>,
}

impl ValidatedDocument {
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Optional fields that were absent and filled from their default
    pub fn defaults_applied(&self) -> &[String] {
        &self.defaults_applied
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Schema validator that enforces schema rules on documents.
///
/// Validator does not mutate its input; the normalized copy is returned.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator backed by the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates a document against the schema of `collection`.
    ///
    /// # Errors
    ///
    /// - `UnknownCollection` if no schema is registered under `collection`
    /// - `Validation` listing every violated field
    pub fn validate(&self, collection: &str, document: &Value) -> SchemaResult<ValidatedDocument> {
        let schema = self.registry.schema(collection)?;
        Ok(validate_against(schema, collection, document)?)
    }
}

/// Validates `document` against `schema`, reporting under `collection`.
pub fn validate_against(
    schema: &Schema,
    collection: &str,
    document: &Value,
) -> Result<ValidatedDocument, ValidationError> {
    let Some(obj) = document.as_object() else {
        return Err(ValidationError {
            collection: collection.to_string(),
            violations: vec![Violation::new(
                "$root",
                ViolationKind::TypeMismatch {
                    expected: "object",
                    actual: json_type_name(document),
                },
            )],
        });
    };

    let mut fields = Map::new();
    let mut defaults_applied = Vec::new();
    let mut violations = Vec::new();

    for field in &schema.fields {
        match obj.get(&field.name) {
            None => {
                if field.required {
                    violations.push(Violation::missing_field(&field.name));
                } else if let Some(default) = &field.default {
                    fields.insert(field.name.clone(), default.clone());
                    defaults_applied.push(field.name.clone());
                }
            }
            // Explicit null on a nullable field leaves it unset
            Some(Value::Null) if field.is_nullable() => {}
            Some(value) => match check_value(field, value) {
                Ok(normalized) => {
                    fields.insert(field.name.clone(), normalized);
                }
                Err(kind) => violations.push(Violation::new(&field.name, kind)),
            },
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError {
            collection: collection.to_string(),
            violations,
        });
    }

    Ok(ValidatedDocument {
        collection: collection.to_string(),
        fields,
        defaults_applied,
    })
}

/// Checks one present value against its field spec and returns the
/// normalized value.
pub(crate) fn check_value(field: &FieldSpec, value: &Value) -> Result<Value, ViolationKind> {
    let mismatch = || ViolationKind::TypeMismatch {
        expected: field.field_type.type_name(),
        actual: json_type_name(value),
    };
    let rules = &field.constraints;

    match field.field_type {
        FieldType::String => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            let text = if rules.strip_whitespace { raw.trim() } else { raw };

            if let Some(min_length) = rules.min_length {
                let actual_length = text.chars().count();
                if actual_length < min_length {
                    return Err(ViolationKind::StringTooShort {
                        min_length,
                        actual_length,
                    });
                }
            }

            match rules.format {
                Some(StringFormat::Email) => normalize_email(text)
                    .map(Value::String)
                    .ok_or(ViolationKind::MalformedFormat {
                        format: StringFormat::Email.name(),
                    }),
                None => Ok(Value::String(text.to_string())),
            }
        }
        FieldType::Int => {
            if !value.is_i64() {
                return Err(mismatch());
            }
            check_bounds(field, value)?;
            Ok(value.clone())
        }
        FieldType::Float => {
            if !value.is_number() {
                return Err(mismatch());
            }
            check_bounds(field, value)?;
            Ok(value.clone())
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(mismatch());
            }
            Ok(value.clone())
        }
        FieldType::Date => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            parse_date(raw)
                .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
                .ok_or(ViolationKind::MalformedFormat { format: "date" })
        }
        FieldType::Time => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            parse_time(raw)
                .map(|time| Value::String(time.format(TIME_FORMAT).to_string()))
                .ok_or(ViolationKind::MalformedFormat { format: "time" })
        }
    }
}

fn check_bounds(field: &FieldSpec, value: &Value) -> Result<(), ViolationKind> {
    let (Value::Number(actual), Some(n)) = (value, value.as_f64()) else {
        return Ok(());
    };
    let rules = &field.constraints;

    let below = rules.ge.as_ref().and_then(Number::as_f64).is_some_and(|ge| n < ge);
    let above = rules.le.as_ref().and_then(Number::as_f64).is_some_and(|le| n > le);

    if below || above {
        return Err(ViolationKind::OutOfRange {
            ge: rules.ge.clone(),
            le: rules.le.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded and signed components; require the fixed layout
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Parses `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let bytes = raw.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return None;
    }
    let time = match bytes.len() {
        5 => NaiveTime::parse_from_str(raw, TIME_FORMAT_SHORT).ok(),
        8 if bytes[5] == b':' => NaiveTime::parse_from_str(raw, TIME_FORMAT).ok(),
        n if n > 9 && bytes[5] == b':' && bytes[8] == b'.' => {
            NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
        }
        _ => None,
    }?;
    // chrono reads second 60 as a leap second
    (time.nanosecond() < 1_000_000_000).then_some(time)
}

/// Checks the address grammar and lowercases the domain part.
pub fn normalize_email(raw: &str) -> Option<String> {
    if raw.len() > MAX_EMAIL_LEN || !EMAIL.is_match(raw) {
        return None;
    }
    let (local, domain) = raw.rsplit_once('@')?;
    if local.len() > MAX_EMAIL_LOCAL_LEN {
        return None;
    }
    Some(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() {
                "int"
            } else if n.is_u64() {
                "uint64"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reservation_schema() -> Schema {
        Schema::new(
            "Reservation",
            vec![
                FieldSpec::required_string("name").trimmed().min_length(2),
                FieldSpec::required_string("email").email(),
                FieldSpec::required_int("guests").in_range(1, 20),
                FieldSpec::required_date("date"),
                FieldSpec::required_time("time"),
                FieldSpec::optional_string("note"),
                FieldSpec::bool_with_default("confirmed", false),
            ],
        )
    }

    fn valid_doc() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "guests": 4,
            "date": "2026-03-14",
            "time": "19:30"
        })
    }

    fn reject(doc: &Value) -> ValidationError {
        validate_against(&reservation_schema(), "reservation", doc).unwrap_err()
    }

    #[test]
    fn test_valid_document_passes() {
        let validated = validate_against(&reservation_schema(), "reservation", &valid_doc()).unwrap();
        assert_eq!(validated.collection(), "reservation");
        assert_eq!(validated.get("guests"), Some(&json!(4)));
    }

    #[test]
    fn test_default_applied_and_nullable_left_unset() {
        let validated = validate_against(&reservation_schema(), "reservation", &valid_doc()).unwrap();
        assert_eq!(validated.get("confirmed"), Some(&json!(false)));
        assert_eq!(validated.defaults_applied(), ["confirmed".to_string()]);
        assert!(validated.get("note").is_none());
    }

    #[test]
    fn test_explicit_null_on_nullable_field_is_unset() {
        let mut doc = valid_doc();
        doc["note"] = Value::Null;
        let validated = validate_against(&reservation_schema(), "reservation", &doc).unwrap();
        assert!(validated.get("note").is_none());
    }

    #[test]
    fn test_null_on_defaulted_field_is_type_mismatch() {
        let mut doc = valid_doc();
        doc["confirmed"] = Value::Null;
        assert!(reject(&doc).has("confirmed", "TYPE_MISMATCH"));
    }

    #[test]
    fn test_all_violations_collected() {
        let doc = json!({
            "name": " A ",
            "email": "nope",
            "guests": "four",
            "date": "14/03/2026"
        });
        let err = reject(&doc);
        assert!(err.has("name", "STRING_TOO_SHORT"));
        assert!(err.has("email", "MALFORMED_FORMAT"));
        assert!(err.has("guests", "TYPE_MISMATCH"));
        assert!(err.has("date", "MALFORMED_FORMAT"));
        assert!(err.has("time", "MISSING_REQUIRED_FIELD"));
        assert_eq!(err.violations.len(), 5);
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let err = reject(&json!({}));
        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, ["name", "email", "guests", "date", "time"]);
    }

    #[test]
    fn test_trim_applies_before_length_and_in_output() {
        let mut doc = valid_doc();
        doc["name"] = json!("   Al   ");
        let validated = validate_against(&reservation_schema(), "reservation", &doc).unwrap();
        assert_eq!(validated.get("name"), Some(&json!("Al")));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut doc = valid_doc();
        doc["name"] = json!("é");
        assert!(reject(&doc).has("name", "STRING_TOO_SHORT"));
    }

    #[test]
    fn test_float_rejected_for_int_field() {
        let mut doc = valid_doc();
        doc["guests"] = json!(4.0);
        let err = reject(&doc);
        let violation = err.for_field("guests").next().unwrap();
        assert_eq!(
            violation.kind,
            ViolationKind::TypeMismatch { expected: "int", actual: "float" }
        );
    }

    #[test]
    fn test_range_is_not_clamped() {
        let mut doc = valid_doc();
        doc["guests"] = json!(50);
        let err = reject(&doc);
        assert!(err.has("guests", "OUT_OF_RANGE"));
    }

    #[test]
    fn test_undeclared_fields_dropped() {
        let mut doc = valid_doc();
        doc["table"] = json!(12);
        let validated = validate_against(&reservation_schema(), "reservation", &doc).unwrap();
        assert!(validated.get("table").is_none());
    }

    #[test]
    fn test_non_object_document_rejected_at_root() {
        let err = reject(&json!(["not", "a", "document"]));
        assert_eq!(err.violations.len(), 1);
        assert!(err.has("$root", "TYPE_MISMATCH"));
    }

    #[test]
    fn test_date_layout_is_strict() {
        assert!(parse_date("2026-03-14").is_some());
        assert!(parse_date("2026-3-14").is_none());
        assert!(parse_date("2026-02-30").is_none());
        assert!(parse_date("14-03-2026").is_none());
    }

    #[test]
    fn test_time_layouts() {
        assert_eq!(parse_time("19:30"), NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(parse_time("19:30:15"), NaiveTime::from_hms_opt(19, 30, 15));
        assert_eq!(parse_time("19:30:15.250"), NaiveTime::from_hms_milli_opt(19, 30, 15, 250));
        assert!(parse_time("7:30").is_none());
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("19:30:").is_none());
        assert!(parse_time("evening").is_none());
        assert!(parse_time("19:30:60").is_none());
        assert!(parse_time("23:59:60.500").is_none());
    }

    #[test]
    fn test_leap_second_time_rejected() {
        let mut doc = valid_doc();
        doc["time"] = json!("19:30:60");
        assert!(reject(&doc).has("time", "MALFORMED_FORMAT"));
    }

    #[test]
    fn test_int_beyond_signed_range_rejected() {
        let mut doc = valid_doc();
        doc["guests"] = json!(u64::MAX);
        let err = reject(&doc);
        let violation = err.for_field("guests").next().unwrap();
        assert_eq!(
            violation.kind,
            ViolationKind::TypeMismatch { expected: "int", actual: "uint64" }
        );
    }

    #[test]
    fn test_time_normalized_to_seconds() {
        let validated = validate_against(&reservation_schema(), "reservation", &valid_doc()).unwrap();
        assert_eq!(validated.get("time"), Some(&json!("19:30:00")));
    }

    #[test]
    fn test_email_grammar() {
        assert_eq!(normalize_email("a@b.co").as_deref(), Some("a@b.co"));
        assert_eq!(
            normalize_email("First.Last+tag@Example.COM").as_deref(),
            Some("First.Last+tag@example.com")
        );
        assert!(normalize_email("not-an-email").is_none());
        assert!(normalize_email("a@b").is_none());
        assert!(normalize_email(".a@b.co").is_none());
        assert!(normalize_email("a..b@b.co").is_none());
        assert!(normalize_email("a@-b.co").is_none());
        assert!(normalize_email("a b@b.co").is_none());
    }
}

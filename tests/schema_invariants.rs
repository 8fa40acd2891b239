//! Schema Invariant Tests
//!
//! Validation invariants of the built-in collections:
//! - Every required field must be present
//! - Numeric bounds are inclusive and never clamped
//! - Email, date and time formats are checked strictly
//! - Defaults are applied to absent optional fields
//! - Every violation is reported at once
//! - Validation is deterministic

use collection_schemas::schema::{
    Booking, ContactMessage, Product, SchemaError, SchemaRegistry, User, ValidationError,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn registry() -> &'static SchemaRegistry {
    SchemaRegistry::global()
}

fn rejected(collection: &str, doc: &Value) -> ValidationError {
    match registry().validate(collection, doc) {
        Err(SchemaError::Validation(err)) => err,
        other => panic!("expected validation failure, got {:?}", other),
    }
}

fn user() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "address": "12 St James's Square, London"
    })
}

fn booking() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "phone": "+1 555 0100",
        "date": "2026-12-09",
        "time": "20:00",
        "guests": 4
    })
}

fn contact() -> Value {
    json!({
        "name": "Alan",
        "email": "alan@example.com",
        "message": "hello"
    })
}

// =============================================================================
// Required Fields
// =============================================================================

/// Dropping any required field yields MISSING_REQUIRED_FIELD naming it.
#[test]
fn test_missing_required_field_is_named() {
    let cases = [
        ("user", user(), ["name", "email", "address"].as_slice()),
        ("booking", booking(), ["name", "email", "phone", "date", "time", "guests"].as_slice()),
        ("contactmessage", contact(), ["name", "email", "message"].as_slice()),
    ];

    for (collection, doc, required) in cases {
        for field in required {
            let mut doc = doc.clone();
            doc.as_object_mut().unwrap().remove(*field);
            let err = rejected(collection, &doc);
            assert!(
                err.has(field, "MISSING_REQUIRED_FIELD"),
                "{}: missing '{}' not reported",
                collection,
                field
            );
            assert_eq!(err.violations.len(), 1);
        }
    }
}

#[test]
fn test_product_requires_title_price_category() {
    let err = rejected("product", &json!({}));
    let fields: Vec<_> = err.fields().collect();
    assert_eq!(fields, ["title", "price", "category"]);
}

// =============================================================================
// Numeric Bounds
// =============================================================================

#[test]
fn test_booking_guests_bounds_inclusive() {
    for guests in [0, 21] {
        let mut doc = booking();
        doc["guests"] = json!(guests);
        assert!(rejected("booking", &doc).has("guests", "OUT_OF_RANGE"));
    }
    for guests in [1, 20] {
        let mut doc = booking();
        doc["guests"] = json!(guests);
        assert!(registry().validate("booking", &doc).is_ok(), "guests = {}", guests);
    }
}

#[test]
fn test_user_age_bounds_inclusive() {
    for age in [-1, 121] {
        let mut doc = user();
        doc["age"] = json!(age);
        assert!(rejected("user", &doc).has("age", "OUT_OF_RANGE"));
    }
    for age in [0, 120] {
        let mut doc = user();
        doc["age"] = json!(age);
        let validated = registry().validate("user", &doc).unwrap();
        assert_eq!(validated.get("age"), Some(&json!(age)));
    }
}

#[test]
fn test_product_price_non_negative() {
    let base = json!({"title": "Teapot", "category": "kitchen"});

    let mut doc = base.clone();
    doc["price"] = json!(-0.01);
    assert!(rejected("product", &doc).has("price", "OUT_OF_RANGE"));

    for price in [json!(0), json!(0.0), json!(19.99)] {
        let mut doc = base.clone();
        doc["price"] = price;
        assert!(registry().validate("product", &doc).is_ok());
    }
}

// =============================================================================
// Formats and Lengths
// =============================================================================

#[test]
fn test_email_format_checked_for_booking_and_contact() {
    for (collection, base) in [("booking", booking()), ("contactmessage", contact())] {
        let mut doc = base.clone();
        doc["email"] = json!("not-an-email");
        assert!(rejected(collection, &doc).has("email", "MALFORMED_FORMAT"));

        let mut doc = base;
        doc["email"] = json!("a@b.co");
        assert!(registry().validate(collection, &doc).is_ok());
    }
}

#[test]
fn test_user_email_is_plain_string() {
    let mut doc = user();
    doc["email"] = json!("not-an-email");
    assert!(registry().validate("user", &doc).is_ok());
}

#[test]
fn test_contact_message_min_length() {
    let mut doc = contact();
    doc["message"] = json!("hi");
    assert!(rejected("contactmessage", &doc).has("message", "STRING_TOO_SHORT"));

    doc["message"] = json!("hello");
    assert!(registry().validate("contactmessage", &doc).is_ok());
}

#[test]
fn test_optional_contact_phone_checked_when_present() {
    let mut doc = contact();
    doc["phone"] = json!("  12345  ");
    assert!(rejected("contactmessage", &doc).has("phone", "STRING_TOO_SHORT"));

    doc["phone"] = json!("  123456  ");
    let validated = registry().validate("contactmessage", &doc).unwrap();
    assert_eq!(validated.get("phone"), Some(&json!("123456")));
}

#[test]
fn test_booking_date_and_time_are_strict() {
    let mut doc = booking();
    doc["date"] = json!("next friday");
    doc["time"] = json!("8pm");
    let err = rejected("booking", &doc);
    assert!(err.has("date", "MALFORMED_FORMAT"));
    assert!(err.has("time", "MALFORMED_FORMAT"));
}

#[test]
fn test_booking_time_rejects_second_sixty() {
    let mut doc = booking();
    doc["time"] = json!("19:30:60");
    assert!(rejected("booking", &doc).has("time", "MALFORMED_FORMAT"));

    doc["time"] = json!("19:30:59");
    let validated = registry().validate("booking", &doc).unwrap();
    assert_eq!(validated.get("time"), Some(&json!("19:30:59")));
}

#[test]
fn test_guests_beyond_signed_integer_range_rejected() {
    let mut doc = booking();
    doc["guests"] = json!(u64::MAX);
    assert!(rejected("booking", &doc).has("guests", "TYPE_MISMATCH"));
}

// =============================================================================
// Defaults and Normalization
// =============================================================================

#[test]
fn test_user_is_active_defaults_true() {
    let validated = registry().validate("user", &user()).unwrap();
    assert_eq!(validated.get("is_active"), Some(&json!(true)));
    assert!(validated.get("age").is_none());
}

#[test]
fn test_explicit_is_active_false_kept() {
    let mut doc = user();
    doc["is_active"] = json!(false);
    let validated = registry().validate("user", &doc).unwrap();
    assert_eq!(validated.get("is_active"), Some(&json!(false)));
    assert!(validated.defaults_applied().is_empty());
}

#[test]
fn test_product_in_stock_defaults_true() {
    let product: Product = registry()
        .validate_as(&json!({"title": "Kettle", "price": 30, "category": "kitchen"}))
        .unwrap();
    assert!(product.in_stock);
    assert!(product.description.is_none());
}

#[test]
fn test_typed_decoding_of_every_collection() {
    let user: User = registry().validate_as(&user()).unwrap();
    assert!(user.is_active);

    let booking: Booking = registry().validate_as(&booking()).unwrap();
    assert_eq!(booking.guests, 4);
    assert_eq!(booking.time.to_string(), "20:00:00");

    let message: ContactMessage = registry().validate_as(&contact()).unwrap();
    assert_eq!(message.message, "hello");
}

// =============================================================================
// Error Collection and Determinism
// =============================================================================

#[test]
fn test_every_violation_reported_at_once() {
    let doc = json!({
        "name": "X",
        "email": "x@",
        "phone": "12",
        "date": "2026-13-01",
        "time": "20:00",
        "guests": 0
    });
    let err = rejected("booking", &doc);
    let fields: Vec<_> = err.fields().collect();
    assert_eq!(fields, ["name", "email", "phone", "date", "guests"]);
}

#[test]
fn test_type_mismatch_not_coerced() {
    let mut doc = booking();
    doc["guests"] = json!("4");
    assert!(rejected("booking", &doc).has("guests", "TYPE_MISMATCH"));

    let mut doc = user();
    doc["is_active"] = json!("yes");
    assert!(rejected("user", &doc).has("is_active", "TYPE_MISMATCH"));
}

/// Same document validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let mut doc = booking();
    doc["guests"] = json!(99);
    let first = rejected("booking", &doc);
    for _ in 0..100 {
        assert_eq!(rejected("booking", &doc), first);
    }
}

#[test]
fn test_unknown_collection_is_not_a_validation_error() {
    let err = registry().validate("blogs", &json!({})).unwrap_err();
    assert_eq!(err, SchemaError::UnknownCollection("blogs".into()));
    assert!(err.validation().is_none());
}

//! Typed document records and their constraint tables
//!
//! Each record fixes the shape of a document at compile time; the paired
//! `schema()` table drives runtime validation and discovery.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{FieldSpec, Schema};

/// A record type bound to a registered schema.
pub trait Document: Serialize + DeserializeOwned {
    /// Declared schema name; the collection is derived from it
    const SCHEMA_NAME: &'static str;

    /// Field constraint table for this record
    fn schema() -> Schema;
}

fn default_true() -> bool {
    true
}

/// Users collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Document for User {
    const SCHEMA_NAME: &'static str = "User";

    fn schema() -> Schema {
        Schema::new(
            Self::SCHEMA_NAME,
            vec![
                FieldSpec::required_string("name").described("Full name"),
                FieldSpec::required_string("email").described("Email address"),
                FieldSpec::required_string("address").described("Address"),
                FieldSpec::optional_int("age")
                    .in_range(0, 120)
                    .described("Age in years"),
                FieldSpec::bool_with_default("is_active", true).described("Whether user is active"),
            ],
        )
        .described("Users collection schema")
    }
}

/// Products collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Document for Product {
    const SCHEMA_NAME: &'static str = "Product";

    fn schema() -> Schema {
        Schema::new(
            Self::SCHEMA_NAME,
            vec![
                FieldSpec::required_string("title").described("Product title"),
                FieldSpec::optional_string("description").described("Product description"),
                FieldSpec::required_float("price")
                    .at_least(0)
                    .described("Price in dollars"),
                FieldSpec::required_string("category").described("Product category"),
                FieldSpec::bool_with_default("in_stock", true)
                    .described("Whether product is in stock"),
            ],
        )
        .described("Products collection schema")
    }
}

/// Table bookings collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Document for Booking {
    const SCHEMA_NAME: &'static str = "Booking";

    fn schema() -> Schema {
        Schema::new(
            Self::SCHEMA_NAME,
            vec![
                FieldSpec::required_string("name")
                    .trimmed()
                    .min_length(2)
                    .described("Guest full name"),
                FieldSpec::required_string("email")
                    .email()
                    .described("Guest email"),
                FieldSpec::required_string("phone")
                    .trimmed()
                    .min_length(6)
                    .described("Contact phone number"),
                FieldSpec::required_date("date").described("Reservation date"),
                FieldSpec::required_time("time").described("Reservation time"),
                FieldSpec::required_int("guests")
                    .in_range(1, 20)
                    .described("Number of guests"),
                FieldSpec::optional_string("message").described("Optional note or request"),
            ],
        )
        .described("Table bookings collection schema")
    }
}

/// Contact messages collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl Document for ContactMessage {
    const SCHEMA_NAME: &'static str = "ContactMessage";

    fn schema() -> Schema {
        Schema::new(
            Self::SCHEMA_NAME,
            vec![
                FieldSpec::required_string("name")
                    .trimmed()
                    .min_length(2)
                    .described("Sender name"),
                FieldSpec::required_string("email")
                    .email()
                    .described("Sender email"),
                FieldSpec::optional_string("phone")
                    .trimmed()
                    .min_length(6)
                    .described("Phone number"),
                FieldSpec::optional_string("subject").described("Subject of the message"),
                FieldSpec::required_string("message")
                    .min_length(5)
                    .described("Message body"),
            ],
        )
        .described("Contact messages collection schema")
    }
}

/// Schemas registered by default, in declaration order.
pub fn builtin_schemas() -> Vec<Schema> {
    vec![
        User::schema(),
        Product::schema(),
        Booking::schema(),
        ContactMessage::schema(),
    ]
}

/// Serializes a record into the document shape the validator expects.
pub fn to_document<T: Document>(record: &T) -> serde_json::Result<Value> {
    serde_json::to_value(record)
}

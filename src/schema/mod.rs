//! Schema registry for document collections
//!
//! Schemas are static descriptors: defined once at startup, never mutated,
//! and queried for discovery and on every document write.
//!
//! # Design Principles
//!
//! - Each collection has a typed record plus an explicit constraint table
//! - Collection names come from an explicit naming table
//! - Validation reports every violation of a document at once
//! - Violations are data; nothing here aborts the host process
//! - No I/O outside the optional schema loader

mod errors;
mod loader;
mod naming;
mod records;
mod registry;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult, ValidationError, Violation, ViolationKind};
pub use loader::SchemaLoader;
pub use naming::{default_collection_name, CollectionNames};
pub use records::{builtin_schemas, to_document, Booking, ContactMessage, Document, Product, User};
pub use registry::{Discovery, SchemaDescriptor, SchemaRegistry};
pub use types::{Constraints, FieldSpec, FieldType, Schema, StringFormat};
pub use validator::{
    normalize_email, parse_date, parse_time, validate_against, SchemaValidator, ValidatedDocument,
    DATE_FORMAT, TIME_FORMAT,
};

//! collection-schemas - validation schemas for database-viewer collections
//!
//! The registry describes each collection (discovery) and validates
//! documents before they are stored or updated.
//!
//! ```
//! use collection_schemas::schema::SchemaRegistry;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::global();
//! let user = registry
//!     .validate("user", &json!({"name": "Ada", "email": "ada@example.com", "address": "London"}))
//!     .unwrap();
//! assert_eq!(user.get("is_active"), Some(&json!(true)));
//! ```

pub mod cli;
pub mod observability;
pub mod schema;

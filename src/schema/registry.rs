//! Process-wide schema registry
//!
//! The registry is built once at startup and then only read. Lookups and
//! validation are pure functions of their inputs.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::naming::CollectionNames;
use super::records::{builtin_schemas, Document};
use super::types::{FieldSpec, Schema};
use super::validator::{SchemaValidator, ValidatedDocument};

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::builtin);

struct Entry {
    collection: String,
    schema: Schema,
}

/// Registry mapping collection names to schemas.
pub struct SchemaRegistry {
    names: CollectionNames,
    /// Registration order
    entries: Vec<Entry>,
    /// Collection name → index into `entries`
    index: HashMap<String, usize>,
}

/// Discovery document describing every registered schema
#[derive(Debug, Serialize)]
pub struct Discovery<'a> {
    pub schemas: Vec<SchemaDescriptor<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SchemaDescriptor<'a> {
    pub name: &'a str,
    pub collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub fields: &'a [FieldSpec],
}

impl SchemaRegistry {
    /// Creates an empty registry using the given naming table.
    pub fn new(names: CollectionNames) -> Self {
        Self {
            names,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registry holding the User, Product, Booking and ContactMessage schemas.
    pub fn builtin() -> Self {
        let mut registry = Self::new(CollectionNames::builtin());
        for schema in builtin_schemas() {
            registry.insert(schema);
        }
        registry
    }

    /// Built-in schemas registered through a custom naming table.
    pub fn with_builtin(names: CollectionNames) -> SchemaResult<Self> {
        let mut registry = Self::new(names);
        for schema in builtin_schemas() {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Shared registry of the built-in schemas.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Registers a schema under its derived collection name.
    ///
    /// # Errors
    ///
    /// - `MalformedSchema` if the schema fails its structural check
    /// - `DuplicateCollection` if the collection is already taken
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed(&schema.name, reason))?;

        let collection = self.names.collection_name(&schema.name);
        if let Some(&i) = self.index.get(&collection) {
            return Err(SchemaError::DuplicateCollection {
                collection,
                existing: self.entries[i].schema.name.clone(),
            });
        }

        self.insert(schema);
        Ok(())
    }

    fn insert(&mut self, mut schema: Schema) {
        schema.normalize_defaults();
        let collection = self.names.collection_name(&schema.name);
        self.index.insert(collection.clone(), self.entries.len());
        self.entries.push(Entry { collection, schema });
    }

    /// Derives the storage collection for a schema name.
    pub fn collection_name(&self, schema_name: &str) -> String {
        self.names.collection_name(schema_name)
    }

    pub fn names(&self) -> &CollectionNames {
        &self.names
    }

    /// Returns the schema registered under `collection`.
    pub fn schema(&self, collection: &str) -> SchemaResult<&Schema> {
        self.index
            .get(collection)
            .map(|&i| &self.entries[i].schema)
            .ok_or_else(|| SchemaError::UnknownCollection(collection.to_string()))
    }

    /// Ordered field specifications of the schema under `collection`.
    pub fn describe(&self, collection: &str) -> SchemaResult<&[FieldSpec]> {
        self.schema(collection).map(|schema| schema.fields.as_slice())
    }

    /// Registered collection names, in registration order.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.collection.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every schema with its collection and field specs.
    pub fn discovery(&self) -> Discovery<'_> {
        Discovery {
            schemas: self
                .entries
                .iter()
                .map(|e| SchemaDescriptor {
                    name: &e.schema.name,
                    collection: &e.collection,
                    description: e.schema.description.as_deref(),
                    fields: &e.schema.fields,
                })
                .collect(),
        }
    }

    /// Validates `document` against the schema of `collection`.
    pub fn validate(&self, collection: &str, document: &Value) -> SchemaResult<ValidatedDocument> {
        SchemaValidator::new(self).validate(collection, document)
    }

    /// Validates against the collection bound to `T` and decodes the result.
    pub fn validate_as<T: Document>(&self, document: &Value) -> SchemaResult<T> {
        let collection = self.collection_name(T::SCHEMA_NAME);
        let validated = self.validate(&collection, document)?;
        serde_json::from_value(validated.into_value()).map_err(|e| SchemaError::Decode {
            collection,
            reason: e.to_string(),
        })
    }
}

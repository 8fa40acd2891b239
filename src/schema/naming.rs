//! Schema name to collection name mapping
//!
//! Built-in schemas are listed explicitly. Names missing from the table
//! fall back to plain lowercasing. Overrides are only ever introduced
//! through configuration; none ship by default.

use std::collections::{BTreeMap, HashMap};

use super::errors::{SchemaError, SchemaResult};

const BUILTIN: &[(&str, &str)] = &[
    ("User", "user"),
    ("Product", "product"),
    ("Booking", "booking"),
    ("ContactMessage", "contactmessage"),
];

/// Lowercasing rule applied to schema names absent from the table.
pub fn default_collection_name(schema_name: &str) -> String {
    schema_name.to_lowercase()
}

/// Explicit schema name → collection name table with override entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionNames {
    entries: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl CollectionNames {
    /// Table holding the built-in schemas and no overrides
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(schema, collection)| (schema.to_string(), collection.to_string()))
                .collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Adds override entries, e.g. `BlogPost → blogs`.
    ///
    /// Rejects empty names, collection names containing whitespace, and
    /// any table in which two schemas would share a collection.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (schema, collection) in overrides {
            let schema = schema.into();
            let collection = collection.into();

            if schema.trim().is_empty() {
                return Err(SchemaError::InvalidOverride("empty schema name".into()));
            }
            if collection.is_empty() || collection.chars().any(char::is_whitespace) {
                return Err(SchemaError::InvalidOverride(format!(
                    "'{}' maps to invalid collection name '{}'",
                    schema, collection
                )));
            }
            self.overrides.insert(schema, collection);
        }

        self.check_unique()?;
        Ok(self)
    }

    /// Derives the storage collection for a schema name
    pub fn collection_name(&self, schema_name: &str) -> String {
        self.overrides
            .get(schema_name)
            .or_else(|| self.entries.get(schema_name))
            .cloned()
            .unwrap_or_else(|| default_collection_name(schema_name))
    }

    fn check_unique(&self) -> SchemaResult<()> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        for schema in self.entries.keys().chain(self.overrides.keys()) {
            let collection = self.collection_name(schema);
            match owners.get(&collection) {
                Some(other) if *other != schema.as_str() => {
                    return Err(SchemaError::InvalidOverride(format!(
                        "'{}' and '{}' both map to collection '{}'",
                        other, schema, collection
                    )));
                }
                _ => {
                    owners.insert(collection, schema);
                }
            }
        }
        Ok(())
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

//! Schema loader for additional schemas kept on disk
//!
//! - One schema per `*.json` file, serialized as a `Schema`
//! - Files are read in file-name order so registration is deterministic
//! - Any unreadable, malformed or conflicting file aborts the load

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::types::Schema;
use crate::observability::{Event, Logger};

/// Reads schema files from a directory and registers them.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
}

impl SchemaLoader {
    /// Creates a new schema loader for the given directory.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Lists the schema files in load order.
    pub fn schema_files(&self) -> SchemaResult<Vec<PathBuf>> {
        let dir = self.schema_dir.display().to_string();

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(&dir, format!("Failed to read schema directory: {}", e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(&dir, format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    /// Parses a single schema file.
    pub fn read_schema_file(path: &Path) -> SchemaResult<Schema> {
        let origin = path.display().to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::malformed(&origin, format!("Failed to read file: {}", e)))?;

        let schema: Schema = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed(&origin, format!("Invalid JSON: {}", e)))?;

        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed(&origin, reason))?;

        Ok(schema)
    }

    /// Loads every schema file into `registry`, returning how many were added.
    pub fn load_into(&self, registry: &mut SchemaRegistry) -> SchemaResult<usize> {
        let files = self.schema_files()?;

        for path in &files {
            let schema = Self::read_schema_file(path)?;
            let name = schema.name.clone();
            let collection = registry.collection_name(&name);
            let file = path.display().to_string();

            registry.register(schema).map_err(|e| match e {
                SchemaError::DuplicateCollection { .. } => {
                    SchemaError::malformed(&file, e.to_string())
                }
                other => other,
            })?;

            Logger::trace(
                Event::SchemaRegistered.as_str(),
                &[("collection", collection.as_str()), ("schema", name.as_str())],
            );
            Logger::info(
                Event::SchemaFileLoaded.as_str(),
                &[("file", file.as_str()), ("schema", name.as_str())],
            );
        }

        Ok(files.len())
    }
}

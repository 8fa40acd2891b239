//! CLI command implementations
//!
//! Each command builds the registry from configuration, computes one JSON
//! value and writes it as a single response line. Failures are written as
//! an error response before being returned to `main`.

use std::path::Path;

use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{CollectionNames, SchemaLoader, SchemaRegistry};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_document, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(cli.config.as_deref(), cli.command);

    if let Err(err) = &result {
        Logger::error(
            Event::CommandFailed.as_str(),
            &[("code", err.code_str()), ("message", err.message())],
        );
        write_error(err)?;
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: Option<&Path>, cmd: Command) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    Logger::set_min_severity(config.severity()?);
    if let Some(path) = config_path {
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", path.display().to_string().as_str())],
        );
    }

    let registry = open_registry(&config)?;

    let data = match cmd {
        Command::List => list(&registry)?,
        Command::Describe { collection } => describe(&registry, &collection)?,
        Command::Validate { collection, file } => {
            let document = read_document(file.as_deref())?;
            validate(&registry, &collection, &document)?
        }
        Command::CollectionName { schema } => collection_name(&registry, &schema),
    };

    write_response(data)
}

/// Builds the registry: built-in schemas under the configured naming
/// table, then any schema files from `schema_dir`.
pub fn open_registry(config: &Config) -> CliResult<SchemaRegistry> {
    let names = CollectionNames::builtin().with_overrides(config.collection_overrides.clone())?;
    let mut registry = SchemaRegistry::with_builtin(names)?;

    if let Some(dir) = &config.schema_dir {
        SchemaLoader::new(dir).load_into(&mut registry)?;
    }

    log_event_with_fields(
        Event::RegistryReady,
        &[("collections", registry.len().to_string().as_str())],
    );
    Ok(registry)
}

/// Discovery document for every registered schema
pub fn list(registry: &SchemaRegistry) -> CliResult<Value> {
    Ok(serde_json::to_value(registry.discovery())?)
}

/// Field specs of one collection
pub fn describe(registry: &SchemaRegistry, collection: &str) -> CliResult<Value> {
    let fields = registry.describe(collection)?;
    Ok(json!({
        "collection": collection,
        "fields": fields
    }))
}

/// Normalized document, or the rejection with every violation
pub fn validate(registry: &SchemaRegistry, collection: &str, document: &Value) -> CliResult<Value> {
    match registry.validate(collection, document) {
        Ok(validated) => {
            Logger::trace(Event::DocumentAccepted.as_str(), &[("collection", collection)]);
            Ok(validated.into_value())
        }
        Err(err) => {
            if let Some(rejection) = err.validation() {
                let count = rejection.violations.len().to_string();
                Logger::trace(
                    Event::DocumentRejected.as_str(),
                    &[("collection", collection), ("violations", count.as_str())],
                );
            }
            Err(err.into())
        }
    }
}

pub fn collection_name(registry: &SchemaRegistry, schema: &str) -> Value {
    json!({
        "schema": schema,
        "collection": registry.collection_name(schema)
    })
}

//! CLI module
//!
//! Provides command-line access to the registry:
//! - list: discovery document for every schema
//! - describe: field specs of one collection
//! - validate: validate one JSON document
//! - collection-name: schema name to collection name

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{collection_name, describe, list, open_registry, run, run_command, validate};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, parse_document, read_document, write_error, write_response};

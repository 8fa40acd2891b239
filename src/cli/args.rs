//! CLI argument definitions using clap
//!
//! Commands:
//! - collection-schemas list
//! - collection-schemas describe <collection>
//! - collection-schemas validate <collection> [--file <path>]
//! - collection-schemas collection-name <schema>
//!
//! Every command accepts `--config <path>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validation schemas for database-viewer collections
#[derive(Parser, Debug)]
#[command(name = "collection-schemas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print every registered schema with its field specs
    List,

    /// Print the field specs of one collection
    Describe {
        /// Collection name, e.g. "booking"
        collection: String,
    },

    /// Validate a JSON document and print its normalized form
    Validate {
        /// Collection name, e.g. "booking"
        collection: String,

        /// Read the document from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print the collection name derived from a schema name
    CollectionName {
        /// Schema name, e.g. "ContactMessage"
        schema: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

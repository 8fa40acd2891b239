//! Configuration file
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "collection_overrides": { "BlogPost": "blogs" },
//!   "log_level": "info"
//! }
//! ```
//!
//! Every key is optional. A relative `schema_dir` is resolved against the
//! directory holding the configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory of additional schema files (optional)
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Schema name → collection name overrides (default: none)
    #[serde(default)]
    pub collection_overrides: BTreeMap<String, String>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: None,
            collection_overrides: BTreeMap::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.schema_dir = config.schema_dir.take().map(|dir| match path.parent() {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        });

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if let Some(dir) = &self.schema_dir {
            if !dir.is_dir() {
                return Err(CliError::config_error(format!(
                    "schema_dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}

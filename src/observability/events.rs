//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in the schema registry and its command-line front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Registry lifecycle
    /// One schema registered
    SchemaRegistered,
    /// Schema file read from the schema directory
    SchemaFileLoaded,
    /// Registry construction complete
    RegistryReady,

    // Validation
    /// Document passed validation
    DocumentAccepted,
    /// Document failed validation
    DocumentRejected,

    /// Command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemaFileLoaded => "SCHEMA_FILE_LOADED",
            Event::RegistryReady => "REGISTRY_READY",
            Event::DocumentAccepted => "DOCUMENT_ACCEPTED",
            Event::DocumentRejected => "DOCUMENT_REJECTED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

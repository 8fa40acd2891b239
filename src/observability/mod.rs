//! Observability for the schema registry
//!
//! Structured JSON-lines logging of lifecycle and validation events.
//!
//! # Usage
//!
//! ```
//! use collection_schemas::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RegistryReady, &[("collections", "4")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at INFO
pub fn log_event(event: Event) {
    Logger::info(event.as_str(), &[]);
}

/// Log a lifecycle event with fields at INFO
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}

//! Observability subsystem
//!
//! Provides structured one-line JSON logging and typed lifecycle events.
//! Logging never changes a validation result.
//!
//! # Usage
//!
//! ```ignore
//! use csvschema::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::ValidationStart, &[("source", "people.csv")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

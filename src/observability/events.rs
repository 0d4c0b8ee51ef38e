//! Observable events
//!
//! Events are explicit and typed. Each maps to one stable string name.

use std::fmt;

use super::logger::Severity;

/// Observable events in a validation run and around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Schema file parsed
    SchemaLoaded,

    // Source
    /// Rows read from a file source
    SourceRead,

    // Validation
    /// A validation run begins
    ValidationStart,
    /// Header row transformed and indexed
    HeaderResolved,
    /// All data rows visited
    RowsProcessed,
    /// Run ended without violations
    ValidationPassed,
    /// Run ended on the first violation
    ValidationFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SourceRead => "SOURCE_READ",
            Event::ValidationStart => "VALIDATION_START",
            Event::HeaderResolved => "HEADER_RESOLVED",
            Event::RowsProcessed => "ROWS_PROCESSED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationFailed => Severity::Warn,
            Event::HeaderResolved | Event::RowsProcessed => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

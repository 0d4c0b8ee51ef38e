//! Schema loader for JSON schema files
//!
//! Every option is optional and defaults to the strict setting. Unknown
//! keys are rejected so a misspelled option cannot silently loosen a check.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;
use crate::observability::{log_event_with_fields, Event};

/// Reads `Schema` values from JSON.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads a schema file.
    ///
    /// # Errors
    ///
    /// - `SourceNotFoundError` if the file does not exist
    /// - `SourceReadError` if it cannot be read
    /// - `ConfigurationError` if it is not a valid schema document
    pub fn load(path: &Path) -> SchemaResult<Schema> {
        if !path.is_file() {
            return Err(SchemaError::source_not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::source_read(path.display().to_string(), e.to_string()))?;

        let schema = Self::from_json(&content).map_err(|e| {
            SchemaError::configuration(format!(
                "Malformed schema file '{}': {}",
                path.display(),
                e.message()
            ))
        })?;

        let path = path.display().to_string();
        let fields = schema.field_requirements.len().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[("fields", fields.as_str()), ("path", path.as_str())],
        );

        Ok(schema)
    }

    /// Parses a schema from a JSON string.
    pub fn from_json(content: &str) -> SchemaResult<Schema> {
        serde_json::from_str(content)
            .map_err(|e| SchemaError::configuration(format!("Invalid schema JSON: {}", e)))
    }
}

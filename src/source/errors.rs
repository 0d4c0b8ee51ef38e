//! Source errors

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Row source errors
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("{0} cannot be found")]
    NotFound(String),

    #[error("Failed to read '{path}': {reason}")]
    Read { path: String, reason: String },
}

impl SourceError {
    pub fn read(path: impl Into<String>, reason: impl ToString) -> Self {
        SourceError::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<SourceError> for SchemaError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::NotFound(path) => SchemaError::source_not_found(path),
            SourceError::Read { path, reason } => SchemaError::source_read(path, reason),
        }
    }
}

//! CLI-specific error types

use std::fmt;
use std::io;

use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Bad command-line argument
    ArgumentError,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArgumentError => "CSVSCHEMA_CLI_ARGUMENT_ERROR",
            Self::IoError => "CSVSCHEMA_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub enum CliError {
    /// Failure of the CLI itself
    Cli { code: CliErrorCode, message: String },
    /// Schema loading or validation failure; already reported on stdout
    Schema(SchemaError),
}

impl CliError {
    pub fn argument_error(msg: impl Into<String>) -> Self {
        CliError::Cli {
            code: CliErrorCode::ArgumentError,
            message: msg.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Cli {
            code: CliErrorCode::IoError,
            message: msg.into(),
        }
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Cli { code, .. } => code.code(),
            CliError::Schema(e) => e.code().code(),
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            CliError::Cli { message, .. } => message,
            CliError::Schema(e) => e.message(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        CliError::Schema(e)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

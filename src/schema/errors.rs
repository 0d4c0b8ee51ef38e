//! Schema error types
//!
//! Error codes:
//! - CSV_CONFIGURATION_ERROR (Configuration)
//! - CSV_DUPLICATE_HEADER / CSV_BLANK_HEADER / CSV_MISSING_HEADER (Header)
//! - CSV_BLANK_ROW / CSV_FIELD_COUNT (Row)
//! - CSV_RESTRICTED_VALUE / CSV_REQUIRED_FIELD / CSV_DUPLICATE_VALUE (Field)
//! - CSV_SOURCE_NOT_FOUND / CSV_SOURCE_READ (Source)
//!
//! Every error is fatal to the validation run that produced it.

use std::fmt;

use super::types::Value;

/// Which part of the input an error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Schema or builder misconfiguration
    Configuration,
    /// Header row shape
    Header,
    /// Data row shape
    Row,
    /// Field contents
    Field,
    /// Reading the underlying data
    Source,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Configuration => write!(f, "CONFIGURATION"),
            Category::Header => write!(f, "HEADER"),
            Category::Row => write!(f, "ROW"),
            Category::Field => write!(f, "FIELD"),
            Category::Source => write!(f, "SOURCE"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Missing data source or unknown column reference
    ConfigurationError,
    /// Header value occurs more than once
    DuplicateHeaderError,
    /// Header cell is blank
    BlankHeaderError,
    /// Required header absent
    MissingHeaderError,
    /// Every field in a data row is blank
    BlankRowError,
    /// Row width differs from the rows before it
    FieldCountError,
    /// Value outside the allowed set
    RestrictedValueError,
    /// Blank value in a column that cannot be nil
    RequiredFieldError,
    /// Repeated value in a unique column
    DuplicateValueError,
    /// Configured file does not exist
    SourceNotFoundError,
    /// File exists but could not be read or tokenized
    SourceReadError,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ConfigurationError => "CSV_CONFIGURATION_ERROR",
            SchemaErrorCode::DuplicateHeaderError => "CSV_DUPLICATE_HEADER",
            SchemaErrorCode::BlankHeaderError => "CSV_BLANK_HEADER",
            SchemaErrorCode::MissingHeaderError => "CSV_MISSING_HEADER",
            SchemaErrorCode::BlankRowError => "CSV_BLANK_ROW",
            SchemaErrorCode::FieldCountError => "CSV_FIELD_COUNT",
            SchemaErrorCode::RestrictedValueError => "CSV_RESTRICTED_VALUE",
            SchemaErrorCode::RequiredFieldError => "CSV_REQUIRED_FIELD",
            SchemaErrorCode::DuplicateValueError => "CSV_DUPLICATE_VALUE",
            SchemaErrorCode::SourceNotFoundError => "CSV_SOURCE_NOT_FOUND",
            SchemaErrorCode::SourceReadError => "CSV_SOURCE_READ",
        }
    }

    /// Returns the category for this error
    pub fn category(&self) -> Category {
        match self {
            SchemaErrorCode::ConfigurationError => Category::Configuration,
            SchemaErrorCode::DuplicateHeaderError
            | SchemaErrorCode::BlankHeaderError
            | SchemaErrorCode::MissingHeaderError => Category::Header,
            SchemaErrorCode::BlankRowError | SchemaErrorCode::FieldCountError => Category::Row,
            SchemaErrorCode::RestrictedValueError
            | SchemaErrorCode::RequiredFieldError
            | SchemaErrorCode::DuplicateValueError => Category::Field,
            SchemaErrorCode::SourceNotFoundError | SchemaErrorCode::SourceReadError => {
                Category::Source
            }
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with positional context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// 1-indexed row number, header = 1
    row: Option<usize>,
    /// Header name of the offending column
    column: Option<String>,
    /// Offending values (duplicates, missing headers, illegal value)
    values: Vec<Value>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            row: None,
            column: None,
            values: Vec::new(),
        }
    }

    /// Create a configuration error with a free-form message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::ConfigurationError, message)
    }

    /// Create a missing data source error
    pub fn source_required() -> Self {
        Self::configuration("a file or data source is required")
    }

    /// Create an unknown column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        let column = column.into();
        let mut err = Self::configuration(format!(
            "The specified column '{}' does not exist",
            column
        ));
        err.column = Some(column);
        err
    }

    /// Create a duplicate header error
    pub fn duplicate_headers(duplicates: Vec<Value>) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::DuplicateHeaderError,
            format!("Duplicate headers exist: {}", inspect_values(&duplicates)),
        );
        err.row = Some(1);
        err.values = duplicates;
        err
    }

    /// Create a blank header error
    pub fn blank_headers() -> Self {
        let mut err = Self::new(
            SchemaErrorCode::BlankHeaderError,
            "There are illegal blank headers.  If this is allowed, set allow_blank_headers to true",
        );
        err.row = Some(1);
        err
    }

    /// Create a missing header error
    pub fn missing_headers(name: &str, missing: Vec<String>) -> Self {
        let values: Vec<Value> = missing.into_iter().map(Some).collect();
        let mut err = Self::new(
            SchemaErrorCode::MissingHeaderError,
            format!("{} is missing headers: {}", name, inspect_values(&values)),
        );
        err.row = Some(1);
        err.values = values;
        err
    }

    /// Create a blank row error
    pub fn blank_row(name: &str, row: usize) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::BlankRowError,
            format!("Row {} in {} is blank", row, name),
        );
        err.row = Some(row);
        err
    }

    /// Create a field count error
    pub fn field_count(row: usize) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::FieldCountError,
            format!(
                "Row {} has a different number of fields than all the rows preceding it",
                row
            ),
        );
        err.row = Some(row);
        err
    }

    /// Create a restricted value error
    pub fn restricted_value(column: &str, value: Value, row: usize) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::RestrictedValueError,
            format!(
                "The '{}' column contains an illegal value: '{}' in row {}",
                column,
                value.as_deref().unwrap_or(""),
                row
            ),
        );
        err.row = Some(row);
        err.column = Some(column.to_string());
        err.values = vec![value];
        err
    }

    /// Create a required field error
    pub fn required_field(column: &str, row: usize) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::RequiredFieldError,
            format!(
                "The '{}' column contains an illegal nil value in row {}",
                column, row
            ),
        );
        err.row = Some(row);
        err.column = Some(column.to_string());
        err
    }

    /// Create a duplicate value error
    pub fn duplicate_values(column: &str, duplicates: Vec<Value>) -> Self {
        let mut err = Self::new(
            SchemaErrorCode::DuplicateValueError,
            format!(
                "The '{}' column contains illegal duplicate values: {}",
                column,
                inspect_values(&duplicates)
            ),
        );
        err.column = Some(column.to_string());
        err.values = duplicates;
        err
    }

    /// Create a source not found error
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::SourceNotFoundError,
            format!("{} cannot be found", path.into()),
        )
    }

    /// Create a source read error
    pub fn source_read(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::SourceReadError,
            format!("Failed to read '{}': {}", path.into(), reason.into()),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error category
    pub fn category(&self) -> Category {
        self.code.category()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the row number if applicable
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Returns the column name if applicable
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the offending values
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.category(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Renders values as a bracketed list, nil for absent values.
fn inspect_values(values: &[Value]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| match v {
            Some(s) => format!("{:?}", s),
            None => "nil".to_string(),
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::ConfigurationError.code(), "CSV_CONFIGURATION_ERROR");
        assert_eq!(SchemaErrorCode::DuplicateHeaderError.code(), "CSV_DUPLICATE_HEADER");
        assert_eq!(SchemaErrorCode::FieldCountError.code(), "CSV_FIELD_COUNT");
        assert_eq!(SchemaErrorCode::DuplicateValueError.code(), "CSV_DUPLICATE_VALUE");
        assert_eq!(SchemaErrorCode::SourceNotFoundError.code(), "CSV_SOURCE_NOT_FOUND");
    }

    #[test]
    fn test_categories() {
        assert_eq!(SchemaErrorCode::BlankHeaderError.category(), Category::Header);
        assert_eq!(SchemaErrorCode::BlankRowError.category(), Category::Row);
        assert_eq!(SchemaErrorCode::RequiredFieldError.category(), Category::Field);
        assert_eq!(SchemaErrorCode::SourceReadError.category(), Category::Source);
    }

    #[test]
    fn test_duplicate_headers_message() {
        let err = SchemaError::duplicate_headers(vec![Some("id".into()), None]);
        assert_eq!(err.message(), "Duplicate headers exist: [\"id\", nil]");
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_restricted_value_context() {
        let err = SchemaError::restricted_value("kind", Some("C".into()), 4);
        assert_eq!(
            err.message(),
            "The 'kind' column contains an illegal value: 'C' in row 4"
        );
        assert_eq!(err.column(), Some("kind"));
        assert_eq!(err.row(), Some(4));
        assert_eq!(err.values(), &[Some("C".to_string())]);
    }

    #[test]
    fn test_display_includes_code() {
        let err = SchemaError::field_count(2);
        let display = format!("{}", err);
        assert!(display.contains("CSV_FIELD_COUNT"));
        assert!(display.contains("ROW"));
        assert!(display.contains("Row 2"));
    }
}

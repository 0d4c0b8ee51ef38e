//! csvschema - A strict, deterministic CSV schema validator
//!
//! Validates a header row and data rows in a single pass and reports the
//! first violation found.
//!
//! ```ignore
//! use csvschema::{FieldRequirement, Schema, Validator};
//!
//! let schema = Schema::new().with_field("id", FieldRequirement::default().unique());
//! let validator = Validator::builder().schema(schema).file("people.csv").build()?;
//! validator.validate()?;
//! ```

pub mod cli;
pub mod observability;
pub mod schema;
pub mod source;

pub use schema::{
    validate_rows, FieldRequirement, HeaderTransform, Row, Schema, SchemaError, SchemaErrorCode,
    SchemaLoader, SchemaResult, Validator, Value,
};
pub use source::{CsvFileSource, MemorySource, RowSource};

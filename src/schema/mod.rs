//! Schema validation subsystem
//!
//! # Design Principles
//!
//! - One pass, fixed check order, first violation wins
//! - Schema is immutable; each run builds its own column-indexed view
//! - Blank values always pass restrict-value checks (`cant_be_nil` forbids them)
//! - Deterministic validation

mod errors;
mod loader;
mod resolved;
mod types;
mod uniqueness;
mod validator;

pub use errors::{Category, SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use resolved::{AllowedValues, HeaderIndex, ResolvedSchema};
pub use types::{is_blank, FieldRequirement, HeaderTransform, Row, Schema, Value};
pub use uniqueness::UniquenessAccumulator;
pub use validator::{validate_rows, Validator, ValidatorBuilder};

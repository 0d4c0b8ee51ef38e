//! One-pass row validator
//!
//! Check order, fixed:
//!
//! Header row (row 1), after transform and column resolution:
//! 1. Duplicate headers
//! 2. Blank headers
//! 3. Required headers
//! 4. Field count (establishes the baseline)
//!
//! Each data row:
//! 1. Blank row
//! 2. Restricted values
//! 3. Non-nil fields
//! 4. Uniqueness accumulation
//! 5. Field count
//!
//! After the last row: duplicate values in unique columns.
//!
//! The first violation ends the run. The `Schema` is only read.

use std::path::PathBuf;

use super::errors::{SchemaError, SchemaResult};
use super::resolved::{HeaderIndex, ResolvedSchema};
use super::types::{is_blank, Row, Schema, Value};
use super::uniqueness::{repeated_values, UniquenessAccumulator};
use crate::observability::{log_event_with_fields, Event};
use crate::source::{CsvFileSource, MemorySource, RowSource};

/// Where a run currently is. `Invalid` is the `Err` returned by `visit`.
enum Phase {
    HeaderPending,
    RowsProcessing {
        resolved: ResolvedSchema,
        uniqueness: UniquenessAccumulator,
    },
}

/// State owned by exactly one pass over one row sequence.
struct ValidationRun<'a> {
    schema: &'a Schema,
    name: &'a str,
    phase: Phase,
    /// 1-indexed, header = 1
    current_row: usize,
    expected_field_count: Option<usize>,
}

impl<'a> ValidationRun<'a> {
    fn new(schema: &'a Schema, name: &'a str) -> Self {
        Self {
            schema,
            name,
            phase: Phase::HeaderPending,
            current_row: 1,
            expected_field_count: None,
        }
    }

    fn visit(&mut self, row: &[Value]) -> SchemaResult<()> {
        if matches!(self.phase, Phase::HeaderPending) {
            let resolved = self.resolve_header(row)?;
            self.validate_headers(resolved.index().headers())?;
            let uniqueness = UniquenessAccumulator::new(resolved.unique_columns());
            self.phase = Phase::RowsProcessing {
                resolved,
                uniqueness,
            };
        } else if let Phase::RowsProcessing {
            resolved,
            uniqueness,
        } = &mut self.phase
        {
            let row_number = self.current_row;
            if !self.schema.allow_blank_rows {
                validate_blank_row(self.name, row_number, row)?;
            }
            validate_restricted_values(resolved, row_number, row)?;
            validate_cant_be_nil(resolved, row_number, row)?;
            uniqueness.record(row);
        }

        if !self.schema.allow_different_field_counts {
            self.validate_field_count(row)?;
        }
        self.current_row += 1;
        Ok(())
    }

    fn resolve_header(&self, header_row: &[Value]) -> SchemaResult<ResolvedSchema> {
        let headers = self.schema.transform_headers(header_row);
        let resolved = ResolvedSchema::resolve(self.schema, HeaderIndex::new(headers))?;

        let columns = resolved.index().width().to_string();
        log_event_with_fields(
            Event::HeaderResolved,
            &[("columns", columns.as_str()), ("source", self.name)],
        );
        Ok(resolved)
    }

    fn validate_headers(&self, headers: &[Value]) -> SchemaResult<()> {
        if !self.schema.allow_duplicate_headers {
            let dups = repeated_values(headers.iter().cloned());
            if !dups.is_empty() {
                return Err(SchemaError::duplicate_headers(dups));
            }
        }

        if !self.schema.allow_blank_headers && headers.iter().any(is_blank) {
            return Err(SchemaError::blank_headers());
        }

        if let Some(required) = &self.schema.required_headers {
            let missing: Vec<String> = required
                .iter()
                .filter(|h| !headers.iter().any(|cell| cell.as_deref() == Some(h.as_str())))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(SchemaError::missing_headers(self.name, missing));
            }
        }

        Ok(())
    }

    /// The first row checked sets the expected width for every later row.
    fn validate_field_count(&mut self, row: &[Value]) -> SchemaResult<()> {
        let expected = *self.expected_field_count.get_or_insert(row.len());
        if expected != row.len() {
            return Err(SchemaError::field_count(self.current_row));
        }
        Ok(())
    }

    fn finish(self) -> SchemaResult<usize> {
        let rows_seen = self.current_row - 1;
        log_event_with_fields(
            Event::RowsProcessed,
            &[("rows", rows_seen.to_string().as_str()), ("source", self.name)],
        );

        if let Phase::RowsProcessing {
            resolved,
            uniqueness,
        } = self.phase
        {
            if let Some((column, dups)) = uniqueness.into_first_duplicates() {
                return Err(SchemaError::duplicate_values(
                    resolved.header_name(column),
                    dups,
                ));
            }
        }
        Ok(rows_seen)
    }
}

fn validate_blank_row(name: &str, row_number: usize, row: &[Value]) -> SchemaResult<()> {
    if row.iter().all(is_blank) {
        return Err(SchemaError::blank_row(name, row_number));
    }
    Ok(())
}

fn validate_restricted_values(
    resolved: &ResolvedSchema,
    row_number: usize,
    row: &[Value],
) -> SchemaResult<()> {
    for (column, allowed) in resolved.restricted_columns() {
        let value = field(row, column);
        if !allowed.permits(&value) {
            return Err(SchemaError::restricted_value(
                resolved.header_name(column),
                value,
                row_number,
            ));
        }
    }
    Ok(())
}

fn validate_cant_be_nil(
    resolved: &ResolvedSchema,
    row_number: usize,
    row: &[Value],
) -> SchemaResult<()> {
    for column in resolved.cant_be_nil_columns() {
        if is_blank(&field(row, column)) {
            return Err(SchemaError::required_field(
                resolved.header_name(column),
                row_number,
            ));
        }
    }
    Ok(())
}

/// Value at `column`; past the end of a short row reads as nil.
fn field(row: &[Value], column: usize) -> Value {
    row.get(column).cloned().flatten()
}

fn run<I>(schema: &Schema, name: &str, rows: I) -> SchemaResult<usize>
where
    I: IntoIterator<Item = Row>,
{
    let mut run = ValidationRun::new(schema, name);
    for row in rows {
        run.visit(&row)?;
    }
    run.finish()
}

fn logged(name: &str, result: SchemaResult<usize>) -> SchemaResult<()> {
    match result {
        Ok(rows) => {
            let rows = rows.to_string();
            log_event_with_fields(
                Event::ValidationPassed,
                &[("rows", rows.as_str()), ("source", name)],
            );
            Ok(())
        }
        Err(e) => {
            let row = e.row().map(|r| r.to_string());
            log_event_with_fields(
                Event::ValidationFailed,
                &failure_fields(&e, row.as_deref(), name),
            );
            Err(e)
        }
    }
}

/// Log fields for a failed run. `row` is left out for errors without one.
fn failure_fields<'a>(
    err: &'a SchemaError,
    row: Option<&'a str>,
    name: &'a str,
) -> Vec<(&'static str, &'a str)> {
    let mut fields = vec![("code", err.code().code()), ("message", err.message())];
    if let Some(row) = row {
        fields.push(("row", row));
    }
    fields.push(("source", name));
    fields
}

/// Validates a row sequence (header first) against a schema.
///
/// Pure over its inputs: the same schema and rows always give the same
/// result, and any number of calls may share one `Schema`.
///
/// # Errors
///
/// Returns the first violation under the fixed check order.
pub fn validate_rows<I>(schema: &Schema, rows: I) -> SchemaResult<()>
where
    I: IntoIterator<Item = Row>,
{
    let name = schema.name.as_deref().unwrap_or("csv");
    log_event_with_fields(Event::ValidationStart, &[("source", name)]);
    logged(name, run(schema, name, rows))
}

/// A schema bound to a data source.
///
/// Each `validate` call is an independent run; a failed run leaves nothing
/// behind, so fixing the input and calling again starts from scratch.
pub struct Validator {
    schema: Schema,
    source: Box<dyn RowSource>,
}

impl Validator {
    /// Creates a validator over any row source
    pub fn new(schema: Schema, source: impl RowSource + 'static) -> Self {
        Self {
            schema,
            source: Box::new(source),
        }
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Dataset name used in messages
    pub fn name(&self) -> String {
        self.schema
            .name
            .clone()
            .unwrap_or_else(|| self.source.name())
    }

    /// Reads the source and runs the full pass.
    ///
    /// # Errors
    ///
    /// - `SourceNotFoundError` if the configured file is missing
    /// - `SourceReadError` if it cannot be tokenized
    /// - otherwise the first violation under the fixed check order
    pub fn validate(&self) -> SchemaResult<()> {
        let name = self.name();
        log_event_with_fields(Event::ValidationStart, &[("source", name.as_str())]);

        let result = self
            .source
            .read_all()
            .map_err(SchemaError::from)
            .and_then(|rows| run(&self.schema, &name, rows));
        logged(&name, result)
    }
}

/// Builder for `Validator`
#[derive(Default)]
pub struct ValidatorBuilder {
    schema: Schema,
    source: Option<Box<dyn RowSource>>,
}

impl ValidatorBuilder {
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Validate pre-tokenized rows
    pub fn data(mut self, rows: Vec<Row>) -> Self {
        self.source = Some(Box::new(MemorySource::new(rows)));
        self
    }

    /// Validate a CSV file
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(Box::new(CsvFileSource::new(path)));
        self
    }

    pub fn source(mut self, source: impl RowSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError` if no data source was given.
    pub fn build(self) -> SchemaResult<Validator> {
        let source = self.source.ok_or_else(SchemaError::source_required)?;
        Ok(Validator {
            schema: self.schema,
            source,
        })
    }
}

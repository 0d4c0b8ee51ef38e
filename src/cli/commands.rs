//! CLI command implementations
//!
//! Commands are thin wrappers: load the schema, hand rows to the
//! validator, report the single result as JSON.

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::observability::{Logger, Severity};
use crate::schema::{Schema, SchemaLoader, Validator};
use crate::source::CsvFileSource;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response, write_schema_error};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Trace);
    }
    let mut stdout = io::stdout();
    run_command(&mut stdout, cli.command)
}

/// Run a parsed command, writing its JSON response to `out`
pub fn run_command<W: Write>(out: &mut W, command: Command) -> CliResult<()> {
    match command {
        Command::Validate {
            schema,
            delimiter,
            file,
        } => validate(out, &schema, delimiter, &file),
        Command::Check { schema } => check(out, &schema),
    }
}

/// Validate one CSV file
pub fn validate<W: Write>(
    out: &mut W,
    schema_path: &Path,
    delimiter: char,
    file: &Path,
) -> CliResult<()> {
    let delimiter = match u8::try_from(delimiter) {
        Ok(b) if b.is_ascii() => b,
        _ => {
            let err = CliError::argument_error(format!(
                "delimiter must be a single ASCII character, got '{}'",
                delimiter
            ));
            write_error(out, err.code_str(), err.message())?;
            return Err(err);
        }
    };

    let schema = load_reported(out, schema_path)?;
    let source = CsvFileSource::new(file).with_delimiter(delimiter);
    let validator = Validator::new(schema, source);

    match validator.validate() {
        Ok(()) => write_response(
            out,
            json!({
                "source": validator.name(),
                "valid": true,
            }),
        ),
        Err(e) => {
            write_schema_error(out, &e)?;
            Err(e.into())
        }
    }
}

/// Parse a schema file and echo its effective settings
pub fn check<W: Write>(out: &mut W, schema_path: &Path) -> CliResult<()> {
    let schema = load_reported(out, schema_path)?;
    write_response(out, describe(&schema))
}

fn load_reported<W: Write>(out: &mut W, schema_path: &Path) -> CliResult<Schema> {
    match SchemaLoader::load(schema_path) {
        Ok(schema) => Ok(schema),
        Err(e) => {
            write_schema_error(out, &e)?;
            Err(e.into())
        }
    }
}

/// Effective settings of a schema, with defaults filled in
pub(crate) fn describe(schema: &Schema) -> Value {
    let mut fields = Map::new();
    for (name, req) in &schema.field_requirements {
        fields.insert(
            name.clone(),
            json!({
                "unique": req.unique,
                "cant_be_nil": req.cant_be_nil,
                "restrict_values": req.restrict_values,
            }),
        );
    }

    json!({
        "name": schema.name,
        "allow_duplicate_headers": schema.allow_duplicate_headers,
        "allow_blank_headers": schema.allow_blank_headers,
        "allow_blank_rows": schema.allow_blank_rows,
        "allow_different_field_counts": schema.allow_different_field_counts,
        "required_headers": schema.required_headers,
        "headers_transform": schema.headers_transform.as_ref().map(|t| t.name()),
        "field_requirements": fields,
    })
}

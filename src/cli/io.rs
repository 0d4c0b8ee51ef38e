//! JSON output for the CLI
//!
//! - One JSON object per command, one line each
//! - The binary writes to stdout; tests pass a buffer
//! - UTF-8 only

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;
use crate::schema::SchemaError;

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_value(out, &json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_value(out, &json!({
        "status": "error",
        "code": code,
        "message": message
    }))
}

/// Write a schema error with its positional context
pub fn write_schema_error<W: Write>(out: &mut W, err: &SchemaError) -> CliResult<()> {
    write_value(out, &schema_error_json(err))
}

pub(crate) fn schema_error_json(err: &SchemaError) -> Value {
    let mut response = json!({
        "status": "error",
        "code": err.code().code(),
        "message": err.message(),
    });
    if let Some(row) = err.row() {
        response["row"] = json!(row);
    }
    if let Some(column) = err.column() {
        response["column"] = json!(column);
    }
    if !err.values().is_empty() {
        response["values"] = json!(err.values());
    }
    response
}

fn write_value<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_json_context() {
        let err = SchemaError::duplicate_values("id", vec![Some("1".into()), None]);
        let value = schema_error_json(&err);
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "CSV_DUPLICATE_VALUE");
        assert_eq!(value["column"], "id");
        assert_eq!(value["values"], json!(["1", null]));
        assert!(value.get("row").is_none());
    }

    #[test]
    fn test_responses_are_single_lines() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"valid": true})).unwrap();
        write_error(&mut out, "CSVSCHEMA_CLI_ARGUMENT_ERROR", "bad").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], json!({"status": "ok", "data": {"valid": true}}));
        assert_eq!(lines[1]["code"], "CSVSCHEMA_CLI_ARGUMENT_ERROR");
        assert_eq!(lines[1]["message"], "bad");
    }

    #[test]
    fn test_schema_error_json_row() {
        let value = schema_error_json(&SchemaError::blank_row("people.csv", 7));
        assert_eq!(value["row"], 7);
        assert!(value.get("column").is_none());
    }
}

//! CLI module
//!
//! Provides command-line interface for:
//! - validate: Check one CSV file against a schema file
//! - check: Parse a schema file and print its effective settings

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_schema_error};

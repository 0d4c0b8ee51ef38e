//! CLI argument definitions using clap
//!
//! Commands:
//! - csvschema validate --schema <path> <data.csv>
//! - csvschema check --schema <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvschema - A strict, deterministic CSV schema validator
#[derive(Parser, Debug)]
#[command(name = "csvschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log every lifecycle event to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a CSV file against a schema
    Validate {
        /// Path to schema file
        #[arg(long, default_value = "./schema.json")]
        schema: PathBuf,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// CSV file to validate
        file: PathBuf,
    },

    /// Parse a schema file and report its settings
    Check {
        /// Path to schema file
        #[arg(long, default_value = "./schema.json")]
        schema: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

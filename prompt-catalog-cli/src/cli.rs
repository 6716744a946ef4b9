//! Command-line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compile, validate and repair prompt catalogs
#[derive(Parser, Debug)]
#[command(name = "prompt-catalog")]
#[command(version)]
#[command(about = "Compile Markdown prompts into a JSON catalog, then validate and repair it")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file layered over the discovered ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for validation results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary and issue tables for the terminal
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a directory of Markdown prompts into a catalog
    #[command(long_about = crate::commands::compile::DESCRIPTION)]
    Compile {
        /// Directory containing Markdown prompt documents
        input_dir: PathBuf,

        /// Catalog file to write (defaults to the configured output file)
        output_file: Option<PathBuf>,

        /// Only compile documents directly inside INPUT_DIR
        #[arg(long)]
        no_recursive: bool,
    },

    /// Check a catalog against the record schema
    #[command(long_about = crate::commands::validate::DESCRIPTION)]
    Validate {
        /// Catalog file to validate
        catalog: PathBuf,

        /// List warnings and infos as well as errors
        #[arg(short, long)]
        verbose: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Repair a catalog so it passes validation
    #[command(long_about = crate::commands::fix::DESCRIPTION)]
    Fix {
        /// Catalog file to repair
        catalog: PathBuf,

        /// Where to write the repaired catalog (defaults to overwriting CATALOG)
        output_file: Option<PathBuf>,

        /// Show the fixes without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Validate the repaired catalog afterwards
        #[arg(long)]
        validate_after: bool,
    },
}

//! Command-line interface for prompt catalogs
//!
//! Commands:
//! - `prompt-catalog compile <INPUT_DIR> [OUTPUT_FILE]`: build a catalog from Markdown prompts
//! - `prompt-catalog validate <CATALOG>`: report schema problems in a catalog
//! - `prompt-catalog fix <CATALOG> [OUTPUT_FILE]`: repair a catalog in place or to a new file
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, including validation errors
//! - 2: Validation found warnings only

pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_codes;

pub use cli::{Cli, Commands, OutputFormat};

use error::{handle_cli_result, CliError};
use prompt_catalog::load_config;

/// Load configuration and run the parsed command, returning the exit code
pub fn run(cli: Cli) -> i32 {
    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => return handle_cli_result(Err(CliError::from(e))),
    };

    let result = match cli.command {
        Commands::Compile {
            input_dir,
            output_file,
            no_recursive,
        } => commands::compile::handle_command(input_dir, output_file, no_recursive, &config),
        Commands::Validate {
            catalog,
            verbose,
            format,
        } => commands::validate::handle_command(catalog, verbose, format, &config),
        Commands::Fix {
            catalog,
            output_file,
            dry_run,
            validate_after,
        } => commands::fix::handle_command(
            catalog,
            output_file,
            dry_run,
            validate_after,
            &config,
        ),
    };

    handle_cli_result(result)
}

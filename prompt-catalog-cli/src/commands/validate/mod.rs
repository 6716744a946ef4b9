//! Validate command implementation

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use anyhow::Context;
use colored::*;
use prompt_catalog::{load_catalog, CatalogConfig, ValidationResult, Validator};
use prompt_catalog_report::{format_validation_json, format_validation_text, ReportOptions};
use std::path::PathBuf;

/// Help text for the validate command
pub const DESCRIPTION: &str = include_str!("description.md");

/// Handle the validate command
pub fn handle_command(
    catalog: PathBuf,
    verbose: bool,
    format: OutputFormat,
    config: &CatalogConfig,
) -> CliResult<i32> {
    let records = load_catalog(&catalog)?;
    let validator = Validator::with_advisor(verbose, config.classifier.suggestion_classifier()?);
    let result = validator.validate(&records);

    match format {
        OutputFormat::Table => {
            println!("{}", "Prompt Catalog Validator".bold());
            println!("Validating {}", catalog.display());
            print!(
                "{}",
                format_validation_text(&result, &ReportOptions::new(verbose, config.report_limit))
            );
        }
        OutputFormat::Json => {
            let json = format_validation_json(&result)
                .context("Failed to serialize validation results")?;
            println!("{json}");
        }
    }

    Ok(exit_code(&result))
}

/// Exit code for a validation outcome
pub fn exit_code(result: &ValidationResult) -> i32 {
    if result.has_errors() {
        EXIT_ERROR
    } else if result.has_warnings() {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    }
}

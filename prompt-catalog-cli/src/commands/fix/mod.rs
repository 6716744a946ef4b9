//! Fix command implementation

use crate::error::CliResult;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use colored::*;
use prompt_catalog::{load_catalog, save_catalog, CatalogConfig, Validator};
use prompt_catalog_report::{format_repair_text, format_validation_text, ReportOptions};
use std::path::PathBuf;

/// Help text for the fix command
pub const DESCRIPTION: &str = include_str!("description.md");

/// Handle the fix command
pub fn handle_command(
    catalog: PathBuf,
    output_file: Option<PathBuf>,
    dry_run: bool,
    validate_after: bool,
    config: &CatalogConfig,
) -> CliResult<i32> {
    let repairer = config.classifier.repairer()?;
    let mut records = load_catalog(&catalog)?;

    println!("{}", "Prompt Catalog Fixer".bold());
    println!("Fixing {}", catalog.display());

    if records.is_empty() {
        println!("{}", "Empty array - nothing to fix".yellow());
        return Ok(EXIT_SUCCESS);
    }

    println!("\nFixing {} prompt(s)...", records.len());
    let report = repairer.repair(&mut records);
    print!("{}", format_repair_text(&report, config.report_limit));

    if dry_run {
        println!("\n{}", "Dry run mode - changes not written".yellow());
    } else {
        let output_file = output_file.unwrap_or_else(|| catalog.clone());
        save_catalog(&output_file, &records)?;
        println!("\nWrote {}", output_file.display());

        if validate_after {
            records = load_catalog(&output_file)?;
        }
    }

    if validate_after {
        println!("{}", "\nRunning validation...".cyan());
        let validator = Validator::with_advisor(true, config.classifier.suggestion_classifier()?);
        let result = validator.validate(&records);
        print!(
            "{}",
            format_validation_text(&result, &ReportOptions::new(true, config.report_limit))
        );
        if result.has_errors() {
            return Ok(EXIT_ERROR);
        }
    }

    if !dry_run && !report.is_clean() {
        println!(
            "{}",
            format!("\nSuccessfully fixed {} issue(s)!", report.fixes.len()).green()
        );
    }
    Ok(EXIT_SUCCESS)
}

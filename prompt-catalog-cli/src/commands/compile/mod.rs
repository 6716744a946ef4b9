//! Compile command implementation

use crate::error::CliResult;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use colored::*;
use prompt_catalog::{write_catalog, CatalogConfig, CompileOptions, Compiler};
use prompt_catalog_report::{format_compile_failures, format_compile_summary, format_progress};
use std::path::PathBuf;

/// Help text for the compile command
pub const DESCRIPTION: &str = include_str!("description.md");

/// Handle the compile command
pub fn handle_command(
    input_dir: PathBuf,
    output_file: Option<PathBuf>,
    no_recursive: bool,
    config: &CatalogConfig,
) -> CliResult<i32> {
    let options = CompileOptions {
        recursive: config.recursive && !no_recursive,
    };
    let compiler = Compiler::with_classifier(options, config.classifier.compile_classifier()?);

    println!("{}", "Prompt Catalog Compiler".bold());
    println!("Compiling prompts from {}", input_dir.display());

    let documents = compiler.discover(&input_dir)?;
    let total = documents.len();
    println!("\nCompiling {total} prompt(s)...\n");

    let report = compiler.compile_paths(documents);
    for (index, (path, ok)) in report.statuses().enumerate() {
        println!("{}", format_progress(index + 1, total, path, ok));
    }

    if !report.has_records() {
        print!("{}", format_compile_failures(&report));
        eprintln!("{}", "\nNo prompts compiled. Exiting.".red());
        return Ok(EXIT_ERROR);
    }

    let output_file = output_file.unwrap_or_else(|| config.output_file.clone());
    write_catalog(&output_file, &report.records)?;
    tracing::info!(
        "Wrote {} records to {}",
        report.records.len(),
        output_file.display()
    );

    print!("{}", format_compile_summary(&report, &output_file));
    Ok(EXIT_SUCCESS)
}

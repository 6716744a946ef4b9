//! Text and JSON rendering of validation results, fix logs and compile runs
//!
//! Renderers build a `String` rather than printing, so the command layer
//! decides where output goes and tests can inspect it.

use crate::display::JsonValidationReport;
use crate::table::{fixes_table, issues_table};
use colored::*;
use prompt_catalog::{CompileReport, RepairReport, ValidationIssue, ValidationResult};
use std::fmt::Write;
use std::path::Path;

/// Default number of entries listed per report section
pub const DEFAULT_REPORT_LIMIT: usize = 20;

/// Controls how much of a report is rendered
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// List warnings and infos as well as errors
    pub verbose: bool,
    /// Maximum entries listed per section
    pub limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

impl ReportOptions {
    pub fn new(verbose: bool, limit: usize) -> Self {
        Self {
            verbose,
            limit: limit.max(1),
        }
    }
}

fn write_header(output: &mut String, title: &str) {
    let rule = "=".repeat(50);
    writeln!(output, "\n{rule}").unwrap();
    writeln!(output, "{}", title.bold()).unwrap();
    writeln!(output, "{rule}").unwrap();
}

fn write_issue_section(
    output: &mut String,
    title: ColoredString,
    issues: &[&ValidationIssue],
    limit: usize,
) {
    if issues.is_empty() {
        return;
    }
    writeln!(output, "\n{title}").unwrap();

    let shown = &issues[..issues.len().min(limit)];
    let with_suggestions = shown.iter().any(|issue| issue.suggestion.is_some());
    writeln!(output, "{}", issues_table(shown, with_suggestions)).unwrap();

    if issues.len() > limit {
        writeln!(output, "... and {} more", issues.len() - limit).unwrap();
    }
}

/// Render a validation result for the terminal
///
/// Errors are always listed. Warnings and infos are listed only in verbose
/// mode, though their counts always appear in the summary.
pub fn format_validation_text(result: &ValidationResult, options: &ReportOptions) -> String {
    let mut output = String::new();

    if result.record_count == 0 {
        writeln!(output, "{}", "Empty array - nothing to validate".yellow()).unwrap();
        return output;
    }

    let errors = result.errors();
    let warnings = result.warnings();
    let infos = result.infos();

    write_header(&mut output, "Validation Summary");
    writeln!(output, "  Records checked: {}", result.record_count).unwrap();
    writeln!(output, "  Errors: {}", errors.len().to_string().red()).unwrap();
    writeln!(output, "  Warnings: {}", warnings.len().to_string().yellow()).unwrap();
    writeln!(output, "  Info: {}", infos.len().to_string().blue()).unwrap();

    write_issue_section(&mut output, "Errors".red().bold(), &errors, options.limit);
    if options.verbose {
        write_issue_section(
            &mut output,
            "Warnings".yellow().bold(),
            &warnings,
            options.limit,
        );
        write_issue_section(&mut output, "Info".blue().bold(), &infos, options.limit);
    }

    if result.has_errors() {
        writeln!(
            output,
            "\n{}",
            format!("❌ Validation failed with {} error(s)", errors.len()).red()
        )
        .unwrap();
    } else if result.has_warnings() {
        writeln!(output, "\n{}", "⚠️ Validation completed with warnings.".yellow()).unwrap();
    } else {
        writeln!(output, "\n{}", "✅ Validation passed!".green()).unwrap();
    }

    output
}

/// Render a validation result as pretty-printed JSON
pub fn format_validation_json(result: &ValidationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonValidationReport::from(result))
}

/// Render the outcome of a repair run
pub fn format_repair_text(report: &RepairReport, limit: usize) -> String {
    let mut output = String::new();
    let limit = limit.max(1);

    write_header(&mut output, "Fix Summary");
    writeln!(output, "  Records processed: {}", report.record_count).unwrap();
    writeln!(output, "  Records changed: {}", report.records_touched).unwrap();
    writeln!(output, "  Fixes applied: {}", report.fixes.len().to_string().green()).unwrap();
    writeln!(output, "  Warnings: {}", report.warnings.len().to_string().yellow()).unwrap();

    if report.is_clean() {
        writeln!(output, "\n{}", "✅ Catalog already conforms, no fixes needed.".green()).unwrap();
        return output;
    }

    writeln!(output, "\n{}", "Fixes applied:".bold()).unwrap();
    let shown = &report.fixes[..report.fixes.len().min(limit)];
    writeln!(output, "{}", fixes_table(shown)).unwrap();
    if report.fixes.len() > limit {
        writeln!(output, "... and {} more", report.fixes.len() - limit).unwrap();
    }

    if !report.warnings.is_empty() {
        writeln!(output, "\n{}", "Warnings:".yellow().bold()).unwrap();
        for warning in report.warnings.iter().take(limit) {
            writeln!(output, "  {} {}", "⚠".yellow(), warning).unwrap();
        }
        if report.warnings.len() > limit {
            writeln!(output, "  ... and {} more", report.warnings.len() - limit).unwrap();
        }
    }

    output
}

/// Render the summary printed after a compile run
///
/// The success line is only printed when every document compiled.
pub fn format_compile_summary(report: &CompileReport, output_file: &Path) -> String {
    let mut output = String::new();

    write_header(&mut output, "Compilation Summary");
    writeln!(output, "  Prompts compiled: {}", report.records.len()).unwrap();
    writeln!(output, "  Output file: {}", output_file.display()).unwrap();
    output.push_str(&format_compile_failures(report));

    if report.failures.is_empty() {
        writeln!(
            output,
            "\n{}",
            format!("Successfully compiled {} prompt(s)!", report.records.len()).green()
        )
        .unwrap();
    }
    output
}

/// Render the documents that failed to compile, or nothing if all succeeded
pub fn format_compile_failures(report: &CompileReport) -> String {
    let mut output = String::new();
    if report.failures.is_empty() {
        return output;
    }

    writeln!(
        output,
        "\n{}",
        format!("Errors ({}):", report.failures.len()).red()
    )
    .unwrap();
    for failure in &report.failures {
        writeln!(output, "  - {}", failure.message).unwrap();
    }
    output
}

/// Render one compile progress line, such as `[2/5] review.md... OK`
pub fn format_progress(index: usize, total: usize, path: &Path, ok: bool) -> String {
    let name = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy();
    let status = if ok { "OK".green() } else { "FAILED".red() };
    format!("[{index}/{total}] {name}... {status}")
}

//! Display objects for report output
//!
//! Rows are plain `Serialize` structs so the same data can be rendered as a
//! table or as JSON.

use prompt_catalog::{Fix, ValidationIssue, ValidationLevel, ValidationResult};
use serde::Serialize;

/// Basic issue information for standard output
#[derive(Serialize, Debug, Clone)]
pub struct IssueRow {
    pub status: String,
    pub record: String,
    pub field: String,
    pub message: String,
}

/// Issue information including the suggested fix
#[derive(Serialize, Debug, Clone)]
pub struct VerboseIssueRow {
    pub status: String,
    pub record: String,
    pub field: String,
    pub message: String,
    pub suggestion: String,
}

/// One applied fix
#[derive(Serialize, Debug, Clone)]
pub struct FixRow {
    pub record: String,
    pub field: String,
    pub action: String,
}

impl From<&ValidationIssue> for IssueRow {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            status: format_level(issue.level),
            record: issue.record_id.clone(),
            field: issue.field.clone(),
            message: issue.message.clone(),
        }
    }
}

impl From<&ValidationIssue> for VerboseIssueRow {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            status: format_level(issue.level),
            record: issue.record_id.clone(),
            field: issue.field.clone(),
            message: issue.message.clone(),
            suggestion: issue
                .suggestion
                .clone()
                .unwrap_or_else(|| "No suggestion".to_string()),
        }
    }
}

impl From<&Fix> for FixRow {
    fn from(fix: &Fix) -> Self {
        Self {
            record: fix.record_id.clone(),
            field: fix.field.clone(),
            action: fix.action.clone(),
        }
    }
}

/// Machine-readable validation report
#[derive(Serialize, Debug)]
pub struct JsonValidationReport<'a> {
    pub records_checked: usize,
    pub passed: bool,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub issues: &'a [ValidationIssue],
}

impl<'a> From<&'a ValidationResult> for JsonValidationReport<'a> {
    fn from(result: &'a ValidationResult) -> Self {
        Self {
            records_checked: result.record_count,
            passed: result.is_ok(),
            errors: result.count(ValidationLevel::Error),
            warnings: result.count(ValidationLevel::Warning),
            infos: result.count(ValidationLevel::Info),
            issues: &result.issues,
        }
    }
}

/// Format a level as a symbol (color is applied in table rendering)
pub fn format_level(level: ValidationLevel) -> String {
    match level {
        ValidationLevel::Error => "\u{2717}".to_string(),   // ✗
        ValidationLevel::Warning => "\u{26A0}".to_string(), // ⚠
        ValidationLevel::Info => "\u{2139}".to_string(),    // ℹ
    }
}

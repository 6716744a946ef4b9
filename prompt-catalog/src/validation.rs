//! Catalog validation
//!
//! The [`Validator`] runs a fixed sequence of checks over a loaded catalog and
//! collects [`ValidationIssue`]s. Each check runs over every record before the
//! next one starts, so issues come out grouped by check. Only error-level
//! issues make a catalog fail validation.

use crate::catalog::{is_present, json_type_name, record_label, value_text};
use crate::classifier::Classifier;
use crate::emoji::looks_like_emoji;
use crate::frontmatter::frontmatter_block;
use crate::record::RECORD_FIELDS;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Error - the catalog cannot be consumed as-is
    Error,
    /// Warning - should be addressed but doesn't prevent usage
    Warning,
    /// Info - advisory hint about potential improvements
    Info,
}

impl ValidationLevel {
    /// Get the string representation of the validation level
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Error => "error",
            ValidationLevel::Warning => "warning",
            ValidationLevel::Info => "info",
        }
    }

    /// Check if this is an error level
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationLevel::Error)
    }

    /// Check if this is a warning level
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationLevel::Warning)
    }

    /// Check if this is an info level
    pub fn is_info(&self) -> bool {
        matches!(self, ValidationLevel::Info)
    }
}

/// A single problem found in a catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity level of the issue
    pub level: ValidationLevel,
    /// Id of the offending record, `unknown` when it has none
    pub record_id: String,
    /// Field the issue is about
    pub field: String,
    /// Description of the validation issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        level: ValidationLevel,
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            record_id: record_id.into(),
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a new error validation issue
    pub fn error(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ValidationLevel::Error, record_id, field, message)
    }

    /// Create a new warning validation issue
    pub fn warning(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ValidationLevel::Warning, record_id, field, message)
    }

    /// Create a new info validation issue
    pub fn info(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ValidationLevel::Info, record_id, field, message)
    }

    /// Set a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Format the validation issue as a human-readable string
    pub fn format(&self) -> String {
        let level = self.level.as_str().to_uppercase();
        let mut result = format!(
            "{}: {}.{} - {}",
            level, self.record_id, self.field, self.message
        );

        if let Some(suggestion) = &self.suggestion {
            result = format!("{}\n  Suggestion: {}", result, suggestion);
        }

        result
    }
}

/// Issues found in one catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Number of records that were checked
    pub record_count: usize,
    /// All validation issues found, in check order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create an empty result for a catalog of `record_count` records
    pub fn new(record_count: usize) -> Self {
        Self {
            record_count,
            issues: Vec::new(),
        }
    }

    /// Check if the validation was successful (no errors)
    pub fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.level.is_error())
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|issue| issue.level.is_warning())
    }

    /// Get all error issues
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.at_level(ValidationLevel::Error)
    }

    /// Get all warning issues
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.at_level(ValidationLevel::Warning)
    }

    /// Get all info issues
    pub fn infos(&self) -> Vec<&ValidationIssue> {
        self.at_level(ValidationLevel::Info)
    }

    /// Number of issues at a level
    pub fn count(&self, level: ValidationLevel) -> usize {
        self.issues.iter().filter(|issue| issue.level == level).count()
    }

    /// Get total number of issues
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Add an issue to the result
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.record_count += other.record_count;
        self.issues.extend(other.issues);
    }

    fn at_level(&self, level: ValidationLevel) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|issue| issue.level == level).collect()
    }
}

/// Checks a catalog against the record schema
///
/// In verbose mode an extra advisory pass suggests a better-fitting emoji for
/// records whose description matches a different symbol.
#[derive(Debug, Clone)]
pub struct Validator {
    verbose: bool,
    advisor: Classifier,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Validator {
    /// Create a validator using the built-in suggestion rules
    pub fn new(verbose: bool) -> Self {
        Self::with_advisor(verbose, Classifier::for_suggestion())
    }

    /// Create a validator with a custom suggestion classifier
    pub fn with_advisor(verbose: bool, advisor: Classifier) -> Self {
        Self { verbose, advisor }
    }

    /// Whether advisory infos are produced
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Validate every record of a catalog
    ///
    /// Array elements that are not objects are treated as records with every
    /// field missing.
    pub fn validate(&self, records: &[Value]) -> ValidationResult {
        let mut result = ValidationResult::new(records.len());
        if records.is_empty() {
            return result;
        }

        check_required_fields(records, &mut result);
        check_field_types(records, &mut result);
        check_id_sequence(records, &mut result);
        self.check_emoji(records, &mut result);
        check_group_format(records, &mut result);
        check_prompt_content(records, &mut result);

        debug!(
            "Validated {} records: {} errors, {} warnings, {} infos",
            records.len(),
            result.count(ValidationLevel::Error),
            result.count(ValidationLevel::Warning),
            result.count(ValidationLevel::Info)
        );
        result
    }

    fn check_emoji(&self, records: &[Value], result: &mut ValidationResult) {
        for record in records {
            let pid = record_label(record);
            let emoji = record.get("emoji");

            if !is_present(emoji) {
                result.add_issue(
                    ValidationIssue::error(&pid, "emoji", "Emoji is missing")
                        .with_suggestion("Add a relevant emoji based on description"),
                );
                continue;
            }

            let Some(emoji) = emoji.and_then(Value::as_str) else {
                continue;
            };

            if !looks_like_emoji(emoji) {
                result.add_issue(
                    ValidationIssue::warning(
                        &pid,
                        "emoji",
                        format!("'{emoji}' may not be a valid emoji"),
                    )
                    .with_suggestion("Use a single emoji character"),
                );
            }

            if !self.verbose {
                continue;
            }
            let description = record
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if description.is_empty() {
                continue;
            }
            if let Some(suggested) = self.advisor.suggest(description, emoji) {
                result.add_issue(
                    ValidationIssue::info(&pid, "emoji", format!("Current: {emoji}"))
                        .with_suggestion(format!("Consider: {suggested}")),
                );
            }
        }
    }
}

/// Validate a catalog with the default validator
pub fn validate_catalog(records: &[Value], verbose: bool) -> ValidationResult {
    Validator::new(verbose).validate(records)
}

fn check_required_fields(records: &[Value], result: &mut ValidationResult) {
    for record in records {
        let pid = record_label(record);
        for field in RECORD_FIELDS {
            if record.get(field).is_none() {
                result.add_issue(
                    ValidationIssue::error(
                        &pid,
                        field,
                        format!("Required field '{field}' is missing"),
                    )
                    .with_suggestion(format!("Add '{field}': <value> to the prompt object")),
                );
            }
        }
    }
}

fn check_field_types(records: &[Value], result: &mut ValidationResult) {
    const STRING_FIELDS: [(&str, &str, &str); 5] = [
        ("id", "ID", "Convert ID to string format"),
        ("name", "Name", "Convert name to string"),
        ("description", "Description", "Convert description to string"),
        ("emoji", "Emoji", "Use a string for emoji"),
        ("prompt", "Prompt", "Convert prompt content to string"),
    ];

    for record in records {
        let pid = record_label(record);
        for (field, label, suggestion) in STRING_FIELDS {
            match record.get(field) {
                Some(value) if !value.is_string() => result.add_issue(
                    ValidationIssue::error(
                        &pid,
                        field,
                        format!("{label} must be a string, got {}", json_type_name(value)),
                    )
                    .with_suggestion(suggestion),
                ),
                _ => {}
            }
        }

        match record.get("group") {
            Some(group) if !group.is_array() => result.add_issue(
                ValidationIssue::error(
                    &pid,
                    "group",
                    format!("Group must be an array, got {}", json_type_name(group)),
                )
                .with_suggestion("Use array format: ['Category1', 'Category2']"),
            ),
            _ => {}
        }
    }
}

fn check_id_sequence(records: &[Value], result: &mut ValidationResult) {
    let mut seen = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let id = match record.get("id") {
            None | Some(Value::Null) => continue,
            Some(id) => id,
        };
        let pid = value_text(id);

        if let Value::String(text) = id {
            if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
                result.add_issue(
                    ValidationIssue::error(&pid, "id", format!("ID must be numeric string, got '{pid}'"))
                        .with_suggestion("Use numeric values like '1', '2', '3'..."),
                );
                continue;
            }
        }

        // Keyed on the JSON text so "1" and 1 stay distinct
        if !seen.insert(id.to_string()) {
            result.add_issue(
                ValidationIssue::error(&pid, "id", format!("Duplicate ID found: '{pid}'"))
                    .with_suggestion("Assign unique sequential IDs"),
            );
        }

        let expected = (index + 1).to_string();
        if id.is_string() && pid != expected {
            result.add_issue(
                ValidationIssue::warning(
                    &pid,
                    "id",
                    format!("ID is not sequential: expected '{expected}', got '{pid}'"),
                )
                .with_suggestion("Use sequential IDs starting from '1'"),
            );
        }
    }
}

fn check_group_format(records: &[Value], result: &mut ValidationResult) {
    for record in records {
        let pid = record_label(record);
        match record.get("group") {
            Some(Value::String(group)) => result.add_issue(
                ValidationIssue::error(
                    &pid,
                    "group",
                    format!("Group is a string, should be array. Got: '{group}'"),
                )
                .with_suggestion(format!("Change to 'group': ['{group}']")),
            ),
            Some(Value::Array(groups)) => {
                if groups.is_empty() {
                    result.add_issue(
                        ValidationIssue::error(&pid, "group", "Group array is empty")
                            .with_suggestion("Add at least one category: ['General']"),
                    );
                }
                for (i, entry) in groups.iter().enumerate() {
                    match entry {
                        Value::String(s) if s.trim().is_empty() => result.add_issue(
                            ValidationIssue::warning(
                                &pid,
                                "group",
                                format!("group[{i}] is an empty string"),
                            )
                            .with_suggestion("Remove empty group entries"),
                        ),
                        Value::String(_) => {}
                        other => result.add_issue(
                            ValidationIssue::warning(
                                &pid,
                                "group",
                                format!("group[{i}] is not a string: {}", value_text(other)),
                            )
                            .with_suggestion("Use string values for group categories"),
                        ),
                    }
                }
            }
            _ => {}
        }
    }
}

fn check_prompt_content(records: &[Value], result: &mut ValidationResult) {
    for record in records {
        let pid = record_label(record);
        let prompt = record.get("prompt");

        if !is_present(prompt) {
            result.add_issue(
                ValidationIssue::error(&pid, "prompt", "Prompt content is empty")
                    .with_suggestion("Add the actual prompt content including YAML frontmatter"),
            );
            continue;
        }

        let Some(content) = prompt.and_then(Value::as_str) else {
            continue;
        };

        if !content.trim().starts_with("---") {
            result.add_issue(
                ValidationIssue::warning(&pid, "prompt", "Prompt may be missing YAML frontmatter")
                    .with_suggestion("Add YAML frontmatter starting with '---'"),
            );
        }

        if let Some(block) = frontmatter_block(content) {
            if !block.contains("description:") {
                result.add_issue(
                    ValidationIssue::info(
                        &pid,
                        "prompt",
                        "YAML frontmatter missing 'description' field",
                    )
                    .with_suggestion("Add 'description: <brief description>'"),
                );
            }
            if !block.contains("category:") && !block.contains("group:") {
                result.add_issue(
                    ValidationIssue::info(&pid, "prompt", "YAML frontmatter missing 'category' field")
                        .with_suggestion("Add 'category: [CategoryName]'"),
                );
            }
        }
    }
}

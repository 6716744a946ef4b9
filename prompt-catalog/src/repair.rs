//! Repair engine that coerces catalog records toward the record schema
//!
//! Fixes run per record in a fixed order: id, name, description, emoji, group
//! and prompt. Later fixes read fields repaired earlier (the prompt fix builds a
//! frontmatter block from the repaired name, description and group).
//!
//! A repaired catalog always validates without errors, and repairing it again
//! changes nothing.

use crate::catalog::{is_present, json_type_name, record_label, value_text};
use crate::classifier::Classifier;
use crate::emoji::is_valid_emoji;
use crate::error::{CatalogError, Result};
use crate::record::DEFAULT_GROUP;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("Failed to compile heading regex"));
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("Failed to compile separator regex"));

/// One change made by the repair engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Label of the record that changed
    pub record_id: String,
    /// Field that changed
    pub field: String,
    /// What was done
    pub action: String,
}

impl Fix {
    fn new(record_id: &str, field: &str, action: impl Into<String>) -> Self {
        Self {
            record_id: record_id.to_string(),
            field: field.to_string(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.record_id, self.field, self.action)
    }
}

/// Everything a repair run changed
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairReport {
    /// Number of records processed
    pub record_count: usize,
    /// Number of records with at least one fix
    pub records_touched: usize,
    /// Fixes in application order
    pub fixes: Vec<Fix>,
    /// Notes about dropped data, such as invalid group entries
    pub warnings: Vec<Fix>,
}

impl RepairReport {
    /// True when the catalog was already conformant
    pub fn is_clean(&self) -> bool {
        self.fixes.is_empty()
    }

    fn fix(&mut self, record_id: &str, field: &str, action: impl Into<String>) {
        let fix = Fix::new(record_id, field, action);
        debug!("Applied fix {}", fix);
        self.fixes.push(fix);
    }

    fn warn(&mut self, record_id: &str, field: &str, message: impl Into<String>) {
        self.warnings.push(Fix::new(record_id, field, message));
    }
}

/// Applies field fixes to catalog records
#[derive(Debug, Clone)]
pub struct Repairer {
    classifier: Classifier,
}

impl Default for Repairer {
    fn default() -> Self {
        Self {
            classifier: Classifier::for_repair(),
        }
    }
}

impl Repairer {
    /// Create a repairer with the built-in repair rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repairer with a custom classifier
    ///
    /// Every symbol the classifier can produce must pass [`is_valid_emoji`],
    /// otherwise a second repair run would replace it again.
    pub fn with_classifier(classifier: Classifier) -> Result<Self> {
        if let Some(symbol) = classifier.symbols().find(|s| !is_valid_emoji(s)) {
            return Err(CatalogError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }
        Ok(Self { classifier })
    }

    /// Repair every record in place
    ///
    /// Array elements that are not objects are replaced by an empty object
    /// first, then filled in like any other record. Records are never removed.
    pub fn repair(&self, records: &mut [Value]) -> RepairReport {
        let mut report = RepairReport {
            record_count: records.len(),
            ..RepairReport::default()
        };

        for (index, record) in records.iter_mut().enumerate() {
            let before = report.fixes.len();
            self.repair_record(record, index, &mut report);
            if report.fixes.len() > before {
                report.records_touched += 1;
            }
        }

        debug!(
            "Repaired {} of {} records with {} fixes",
            report.records_touched,
            report.record_count,
            report.fixes.len()
        );
        report
    }

    /// Repair a single record at `index` (zero-based)
    pub fn repair_record(&self, record: &mut Value, index: usize, report: &mut RepairReport) {
        if !record.is_object() {
            report.fix(
                &record_label(record),
                "record",
                format!("Replaced {} with an empty object", json_type_name(record)),
            );
            *record = Value::Object(Map::new());
        }
        let Value::Object(fields) = record else {
            return;
        };

        fix_id(fields, index, report);
        let pid = (index + 1).to_string();
        fix_name(fields, &pid, report);
        fix_description(fields, &pid, report);
        self.fix_emoji(fields, &pid, report);
        fix_group(fields, &pid, report);
        fix_prompt(fields, &pid, report);
    }

    fn fix_emoji(&self, fields: &mut Map<String, Value>, pid: &str, report: &mut RepairReport) {
        let keep = match fields.get("emoji") {
            Some(Value::String(emoji)) => is_valid_emoji(emoji),
            _ => false,
        };
        if keep {
            return;
        }

        let symbol = self
            .classifier
            .classify(str_field(fields, "description"), str_field(fields, "name"))
            .to_string();
        report.fix(pid, "emoji", format!("Generated '{symbol}' from description"));
        fields.insert("emoji".into(), Value::String(symbol));
    }
}

/// Repair a catalog with the built-in rules
pub fn repair_catalog(records: &mut [Value]) -> RepairReport {
    Repairer::new().repair(records)
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn fix_id(fields: &mut Map<String, Value>, index: usize, report: &mut RepairReport) {
    let expected = (index + 1).to_string();
    let current = fields.get("id");
    if current.and_then(Value::as_str) == Some(expected.as_str()) {
        return;
    }

    let label = match current {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(id) => value_text(id),
    };
    report.fix(&label, "id", format!("Changed to '{expected}'"));
    fields.insert("id".into(), Value::String(expected));
}

fn fix_name(fields: &mut Map<String, Value>, pid: &str, report: &mut RepairReport) {
    if matches!(fields.get("name"), Some(Value::String(name)) if !name.is_empty()) {
        return;
    }

    let name = match extract_name(str_field(fields, "prompt")) {
        Some(name) => {
            report.fix(pid, "name", format!("Extracted from content: '{name}'"));
            name
        }
        None => {
            let name = format!("prompt-{pid}");
            report.fix(pid, "name", format!("Generated default: '{name}'"));
            name
        }
    };
    fields.insert("name".into(), Value::String(name));
}

/// Derive a kebab-case name from the first Markdown heading
fn extract_name(content: &str) -> Option<String> {
    let title = HEADING_RE.captures(content)?.get(1)?.as_str().trim();
    let name = SEPARATOR_RE
        .replace_all(&title.to_lowercase(), "-")
        .trim()
        .to_string();
    (!name.is_empty()).then_some(name)
}

fn fix_description(fields: &mut Map<String, Value>, pid: &str, report: &mut RepairReport) {
    let description = match fields.get("description") {
        Some(Value::String(_)) => return,
        None | Some(Value::Null) => {
            report.fix(pid, "description", "Added empty string");
            String::new()
        }
        Some(other) => {
            report.fix(pid, "description", "Converted to string");
            value_text(other)
        }
    };
    fields.insert("description".into(), Value::String(description));
}

fn fix_group(fields: &mut Map<String, Value>, pid: &str, report: &mut RepairReport) {
    let default_group = || Value::Array(vec![Value::String(DEFAULT_GROUP.to_string())]);

    let replacement = match fields.get("group") {
        None | Some(Value::Null) => {
            report.fix(pid, "group", format!("Added default: ['{DEFAULT_GROUP}']"));
            default_group()
        }
        Some(Value::String(group)) if group.trim().is_empty() => {
            report.fix(
                pid,
                "group",
                format!("Converted string to array: ['{DEFAULT_GROUP}']"),
            );
            default_group()
        }
        Some(Value::String(group)) => {
            report.fix(pid, "group", format!("Converted string to array: ['{group}']"));
            Value::Array(vec![Value::String(group.clone())])
        }
        Some(Value::Array(groups)) if groups.is_empty() => {
            report.fix(
                pid,
                "group",
                format!("Added default to empty array: ['{DEFAULT_GROUP}']"),
            );
            default_group()
        }
        Some(Value::Array(groups)) => {
            let mut kept = Vec::with_capacity(groups.len());
            for entry in groups {
                match entry {
                    Value::String(s) if !s.trim().is_empty() => {
                        kept.push(Value::String(s.trim().to_string()))
                    }
                    Value::Null => {}
                    other => {
                        report.warn(pid, "group", format!("Removed invalid entry: {}", value_text(other)))
                    }
                }
            }

            if kept.is_empty() {
                report.fix(
                    pid,
                    "group",
                    format!("Replaced invalid array with: ['{DEFAULT_GROUP}']"),
                );
                default_group()
            } else if kept.len() != groups.len() {
                report.fix(
                    pid,
                    "group",
                    format!("Removed {} invalid entries", groups.len() - kept.len()),
                );
                Value::Array(kept)
            } else {
                return;
            }
        }
        Some(other) => {
            report.fix(
                pid,
                "group",
                format!(
                    "Converted {} to array: ['{DEFAULT_GROUP}']",
                    json_type_name(other)
                ),
            );
            default_group()
        }
    };
    fields.insert("group".into(), replacement);
}

fn fix_prompt(fields: &mut Map<String, Value>, pid: &str, report: &mut RepairReport) {
    let current = fields.get("prompt");

    let content = if !is_present(current) {
        let name = str_field(fields, "name");
        let prompt = format!(
            "{}\n\n# {name}\n\nYour prompt content here.",
            minimal_frontmatter(fields)
        );
        report.fix(pid, "prompt", "Generated minimal prompt with YAML frontmatter");
        prompt
    } else {
        let mut changed = false;
        let mut content = match current {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                report.fix(pid, "prompt", "Converted to string");
                changed = true;
                value_text(other)
            }
            None => String::new(),
        };
        if !content.trim().starts_with("---") {
            content = format!("{}\n\n{content}", minimal_frontmatter(fields));
            report.fix(pid, "prompt", "Added YAML frontmatter");
            changed = true;
        }
        if !changed {
            return;
        }
        content
    };
    fields.insert("prompt".into(), Value::String(content));
}

/// Two-field frontmatter block built from the repaired record
fn minimal_frontmatter(fields: &Map<String, Value>) -> String {
    let description = str_field(fields, "description");
    let category = fields
        .get("group")
        .and_then(Value::as_array)
        .and_then(|groups| groups.first())
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_GROUP);
    format!("---\ndescription: {description}\ncategory:\n  - {category}\n---")
}

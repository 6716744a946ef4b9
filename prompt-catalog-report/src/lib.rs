//! Terminal and JSON reports for prompt catalogs
//!
//! Renders [`prompt_catalog::ValidationResult`]s, repair fix logs and compile
//! summaries. Tables adapt to the terminal width; JSON output is meant for
//! scripts and CI.

pub mod display;
pub mod render;
pub mod table;

pub use display::{format_level, FixRow, IssueRow, JsonValidationReport, VerboseIssueRow};
pub use render::{
    format_compile_failures, format_compile_summary, format_progress, format_repair_text,
    format_validation_json, format_validation_text, ReportOptions, DEFAULT_REPORT_LIMIT,
};
pub use table::{fixes_table, issues_table, new_table, truncate_str};

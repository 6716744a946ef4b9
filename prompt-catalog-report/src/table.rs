//! Table rendering utilities.
//!
//! Provides terminal-width-aware tables using comfy-table with colored status
//! symbols.

use crate::display::{FixRow, IssueRow, VerboseIssueRow};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use prompt_catalog::{Fix, ValidationIssue, ValidationLevel};

/// Longest message shown in a table cell before truncation
pub const MAX_CELL_CHARS: usize = 160;

/// Create a table pre-configured for terminal-width-aware output.
///
/// Uses crossterm to detect the actual terminal width, falling back to
/// 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
///
/// Safe for multi-byte (UTF-8) strings.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Build a table of validation issues.
///
/// With suggestions, tables carry an extra column for the suggested fix.
pub fn issues_table(issues: &[&ValidationIssue], with_suggestions: bool) -> Table {
    let mut table = new_table();

    if with_suggestions {
        table.set_header(vec!["", "Record", "Field", "Message", "Suggestion"]);
        for issue in issues {
            let row = VerboseIssueRow::from(*issue);
            table.add_row(vec![
                status_cell(&row.status, issue.level),
                Cell::new(&row.record),
                Cell::new(&row.field),
                Cell::new(truncate_str(&row.message, MAX_CELL_CHARS)),
                Cell::new(truncate_str(&row.suggestion, MAX_CELL_CHARS)),
            ]);
        }
    } else {
        table.set_header(vec!["", "Record", "Field", "Message"]);
        for issue in issues {
            let row = IssueRow::from(*issue);
            table.add_row(vec![
                status_cell(&row.status, issue.level),
                Cell::new(&row.record),
                Cell::new(&row.field),
                Cell::new(truncate_str(&row.message, MAX_CELL_CHARS)),
            ]);
        }
    }

    table
}

/// Build a table of applied fixes.
pub fn fixes_table(fixes: &[Fix]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Record", "Field", "Action"]);
    for fix in fixes {
        let row = FixRow::from(fix);
        table.add_row(vec![
            Cell::new("\u{2713}").fg(Color::Green),
            Cell::new(&row.record),
            Cell::new(&row.field),
            Cell::new(truncate_str(&row.action, MAX_CELL_CHARS)),
        ]);
    }
    table
}

/// Color a row's status symbol by its level.
fn status_cell(status: &str, level: ValidationLevel) -> Cell {
    let color = match level {
        ValidationLevel::Error => Color::Red,
        ValidationLevel::Warning => Color::Yellow,
        ValidationLevel::Info => Color::Blue,
    };
    Cell::new(status).fg(color)
}

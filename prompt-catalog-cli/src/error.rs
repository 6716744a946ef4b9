//! Error handling for the command-line interface
//!
//! Library errors keep their source chain so the full cause can be printed
//! before the process exits with the error's exit code.

use colored::*;
use std::error::Error;
use std::fmt;

use crate::exit_codes::EXIT_ERROR;
use prompt_catalog::CatalogError;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type carrying the exit code to use
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<CatalogError> for CliError {
    fn from(error: CatalogError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_ERROR,
            source: error
                .source()
                .map(|source| source.to_string().into()),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let message = error
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  Caused by: ");
        Self::new(message, EXIT_ERROR)
    }
}

/// Convert a command result to an exit code, printing the full error chain
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Command failed with exit code {}", e.exit_code);
            eprintln!("{} {}", "Error:".red().bold(), e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_full_chain_without_source() {
        let error = CliError::new("boom", EXIT_ERROR);
        assert_eq!(error.full_chain(), "boom");
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn test_from_catalog_error_keeps_cause() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = CliError::from(CatalogError::io("catalog.json", source));
        assert_eq!(error.exit_code, EXIT_ERROR);
        assert!(error.full_chain().contains("catalog.json"));
        assert!(error.full_chain().contains("Caused by: denied"));
    }

    #[test]
    fn test_from_anyhow_flattens_context() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("disk full")).context("writing catalog");
        let error = CliError::from(result.unwrap_err());
        assert_eq!(error.full_chain(), "writing catalog\n  Caused by: disk full");
    }

    #[test]
    fn test_handle_cli_result() {
        assert_eq!(handle_cli_result(Ok(2)), 2);
        assert_eq!(
            handle_cli_result(Err(CliError::new("failed", EXIT_ERROR))),
            EXIT_ERROR
        );
    }
}

//! Error types for prompt catalog operations
//!
//! Only operational failures live here. Problems found *inside* a catalog are
//! reported as [`ValidationIssue`](crate::ValidationIssue) data, and a single
//! unreadable document is recorded as a [`CompileFailure`](crate::CompileFailure)
//! without aborting the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Fatal errors that stop a compile, validate or fix run
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Reading or writing a file failed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The catalog is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        /// Catalog path
        path: PathBuf,
        /// Parser error with line and column
        source: serde_json::Error,
    },

    /// Serializing the catalog failed
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The catalog root element is not an array
    #[error("Root element of {} must be an array, got {found}", path.display())]
    NotAnArray {
        /// Catalog path
        path: PathBuf,
        /// JSON type name that was found instead
        found: &'static str,
    },

    /// The compile input is not a directory
    #[error("{} is not a directory", path.display())]
    NotADirectory {
        /// Input path
        path: PathBuf,
    },

    /// The compile input contains no Markdown documents
    #[error("No Markdown documents found in {}", path.display())]
    NoDocuments {
        /// Input directory
        path: PathBuf,
    },

    /// A classifier rule pattern failed to compile
    #[error("Invalid classifier pattern '{pattern}': {source}")]
    InvalidRule {
        /// The offending pattern
        pattern: String,
        /// Regex compilation error
        source: Box<regex::Error>,
    },

    /// A symbol cannot be used where repaired records must stay valid
    #[error("'{symbol}' is not a usable emoji symbol")]
    InvalidSymbol {
        /// The rejected symbol
        symbol: String,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },
}

impl CatalogError {
    /// Wrap an IO error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return CatalogError::FileNotFound { path };
        }
        CatalogError::Io { path, source }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CatalogError::Config {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for CatalogError {
    fn from(error: figment::Error) -> Self {
        CatalogError::config(error.to_string())
    }
}

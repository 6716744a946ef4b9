//! # Prompt Catalog
//!
//! Compiles a directory of Markdown prompts with YAML-like frontmatter into a
//! JSON prompt catalog, validates existing catalogs and repairs them.
//!
//! ## Compiling
//!
//! ```no_run
//! use prompt_catalog::{compile_directory, write_catalog, CompileOptions};
//! use std::path::Path;
//!
//! let report = compile_directory(Path::new("./prompts"), &CompileOptions::default())?;
//! write_catalog(Path::new("catalog.json"), &report.records)?;
//! # Ok::<(), prompt_catalog::CatalogError>(())
//! ```
//!
//! ## Validating and repairing
//!
//! ```no_run
//! use prompt_catalog::{load_catalog, repair_catalog, save_catalog, validate_catalog};
//! use std::path::Path;
//!
//! let mut records = load_catalog(Path::new("catalog.json"))?;
//! if !validate_catalog(&records, false).is_ok() {
//!     let report = repair_catalog(&mut records);
//!     println!("{} fixes", report.fixes.len());
//!     save_catalog(Path::new("catalog.json"), &records)?;
//! }
//! # Ok::<(), prompt_catalog::CatalogError>(())
//! ```

pub mod catalog;
pub mod classifier;
pub mod compile;
pub mod config;
pub mod emoji;
pub mod error;
pub mod frontmatter;
pub mod logging;
pub mod record;
pub mod repair;
pub mod validation;

pub use catalog::{load_catalog, save_catalog, to_catalog_json, write_catalog};
pub use classifier::{Classifier, MatchMode, Rule, RuleSet, DEFAULT_SYMBOL};
pub use compile::{compile_directory, CompileFailure, CompileOptions, CompileReport, Compiler};
pub use config::{load_config, CatalogConfig, ClassifierConfig, ConfigLoader};
pub use emoji::{is_valid_emoji, looks_like_emoji};
pub use error::{CatalogError, Result};
pub use frontmatter::{parse_frontmatter, Frontmatter, FrontmatterResult, FrontmatterValue};
pub use logging::Pretty;
pub use record::{PromptRecord, DEFAULT_GROUP};
pub use repair::{repair_catalog, Fix, RepairReport, Repairer};
pub use validation::{
    validate_catalog, ValidationIssue, ValidationLevel, ValidationResult, Validator,
};

//! Compiling a directory of Markdown prompts into catalog records

use crate::classifier::Classifier;
use crate::error::{CatalogError, Result};
use crate::record::{assign_ids, PromptRecord};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options for a compile run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { recursive: true }
    }
}

/// A document that could not be compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    /// Path of the document
    pub path: PathBuf,
    /// Why it was skipped
    pub message: String,
}

/// Outcome of compiling a directory
#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    /// Every document considered, in compile order
    pub documents: Vec<PathBuf>,
    /// Compiled records with ids assigned
    pub records: Vec<PromptRecord>,
    /// Documents that were skipped
    pub failures: Vec<CompileFailure>,
}

impl CompileReport {
    /// Each document with whether it compiled, in compile order
    pub fn statuses(&self) -> impl Iterator<Item = (&Path, bool)> {
        let failed: HashSet<&Path> = self.failures.iter().map(|f| f.path.as_path()).collect();
        self.documents
            .iter()
            .map(move |path| (path.as_path(), !failed.contains(path.as_path())))
    }

    /// True when at least one record was produced
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Turns Markdown documents into [`PromptRecord`]s
#[derive(Debug, Clone)]
pub struct Compiler {
    options: CompileOptions,
    classifier: Classifier,
}

impl Compiler {
    /// Create a compiler using the built-in compile rules
    pub fn new(options: CompileOptions) -> Self {
        Self::with_classifier(options, Classifier::for_compile())
    }

    /// Create a compiler with a custom classifier
    pub fn with_classifier(options: CompileOptions, classifier: Classifier) -> Self {
        Self {
            options,
            classifier,
        }
    }

    /// Find the Markdown documents under `dir`, sorted by path
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(CatalogError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let max_depth = if self.options.recursive { usize::MAX } else { 1 };
        let mut documents: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            })
            // Follows symlinks to files; the walk itself does not follow links
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        documents.sort();

        if documents.is_empty() {
            return Err(CatalogError::NoDocuments {
                path: dir.to_path_buf(),
            });
        }
        debug!("Found {} documents in {}", documents.len(), dir.display());
        Ok(documents)
    }

    /// Compile one document; the record id is left empty
    pub fn compile_document(&self, path: &Path) -> std::result::Result<PromptRecord, CompileFailure> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            warn!("Failed to read {}: {}", path.display(), e);
            CompileFailure {
                path: path.to_path_buf(),
                message: format!("Failed to read {name}: {e}"),
            }
        })?;

        let record = PromptRecord::from_document(&text, path, &self.classifier);
        debug!(
            "Compiled {} as '{}' {} {:?}",
            path.display(),
            record.name,
            record.emoji,
            record.group
        );
        Ok(record)
    }

    /// Compile documents in parallel, then assign ids in the given order
    pub fn compile_paths(&self, documents: Vec<PathBuf>) -> CompileReport {
        let outcomes: Vec<_> = documents
            .par_iter()
            .map(|path| self.compile_document(path))
            .collect();

        let mut records = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(failure) => failures.push(failure),
            }
        }
        assign_ids(&mut records);

        info!(
            "Compiled {} of {} documents",
            records.len(),
            documents.len()
        );
        CompileReport {
            documents,
            records,
            failures,
        }
    }

    /// Discover and compile every document under `dir`
    pub fn compile_directory(&self, dir: &Path) -> Result<CompileReport> {
        let documents = self.discover(dir)?;
        Ok(self.compile_paths(documents))
    }
}

/// Compile a directory with the built-in rules
pub fn compile_directory(dir: &Path, options: &CompileOptions) -> Result<CompileReport> {
    Compiler::new(options.clone()).compile_directory(dir)
}

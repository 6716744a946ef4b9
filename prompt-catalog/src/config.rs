//! Configuration loading using Figment
//!
//! Sources are merged in precedence order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. Global file `~/.prompt-catalog/config.{toml,yaml,yml,json}`
//! 3. Project file `./.prompt-catalog/config.{toml,yaml,yml,json}`
//! 4. An explicitly named file (`--config`)
//! 5. Environment variables prefixed `PROMPT_CATALOG_`, `__` separating nested keys
//!
//! Missing files are skipped. The merged configuration is validated before it
//! is returned.

use crate::classifier::{Classifier, MatchMode, Rule, RuleSet, DEFAULT_SYMBOL};
use crate::emoji::is_valid_emoji;
use crate::error::{CatalogError, Result};
use crate::logging::Pretty;
use crate::repair::Repairer;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Directory name used for global and project configuration
pub const CONFIG_DIR_NAME: &str = ".prompt-catalog";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "PROMPT_CATALOG_";

/// Default catalog file written by `compile`
pub const DEFAULT_OUTPUT_FILE: &str = "cherry-studio-prompts.json";

const CONFIG_FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

/// Effective configuration of the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog written by `compile` when no output file is given
    pub output_file: PathBuf,
    /// Whether `compile` descends into subdirectories
    pub recursive: bool,
    /// Maximum entries listed per section of a text report
    pub report_limit: usize,
    /// Emoji classification settings
    pub classifier: ClassifierConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            recursive: true,
            report_limit: 20,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Rule tables and fallback symbol
///
/// A rule list given here replaces the built-in table for that stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Symbol used when no rule matches
    pub fallback_symbol: String,
    /// Regex rules used by `compile`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_rules: Option<Vec<Rule>>,
    /// Substring rules used by `fix`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_rules: Option<Vec<Rule>>,
    /// Substring rules used for verbose validation hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_rules: Option<Vec<Rule>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fallback_symbol: DEFAULT_SYMBOL.to_string(),
            compile_rules: None,
            repair_rules: None,
            suggestion_rules: None,
        }
    }
}

impl ClassifierConfig {
    /// Classifier for compiling documents
    pub fn compile_classifier(&self) -> Result<Classifier> {
        let rules = match &self.compile_rules {
            Some(rules) => RuleSet::new(MatchMode::Regex, rules.clone()),
            None => RuleSet::compile(),
        };
        Classifier::new(&rules, self.fallback_symbol.as_str())
    }

    /// Classifier for regenerating symbols during repair
    pub fn repair_classifier(&self) -> Result<Classifier> {
        let rules = match &self.repair_rules {
            Some(rules) => RuleSet::new(MatchMode::Substring, rules.clone()),
            None => RuleSet::repair(),
        };
        Classifier::new(&rules, self.fallback_symbol.as_str())
    }

    /// Classifier for validator hints
    pub fn suggestion_classifier(&self) -> Result<Classifier> {
        let rules = match &self.suggestion_rules {
            Some(rules) => RuleSet::new(MatchMode::Substring, rules.clone()),
            None => RuleSet::suggestion(),
        };
        Classifier::new(&rules, self.fallback_symbol.as_str())
    }

    /// Repair engine built from the repair classifier
    pub fn repairer(&self) -> Result<Repairer> {
        Repairer::with_classifier(self.repair_classifier()?)
    }
}

impl CatalogConfig {
    /// Check that the configuration can produce valid catalogs
    pub fn validate(&self) -> Result<()> {
        if !is_valid_emoji(&self.classifier.fallback_symbol) {
            return Err(CatalogError::config(format!(
                "classifier.fallback_symbol '{}' is not a valid emoji",
                self.classifier.fallback_symbol
            )));
        }
        if self.report_limit == 0 {
            return Err(CatalogError::config("report_limit must be at least 1"));
        }

        self.classifier
            .compile_classifier()
            .map_err(|e| CatalogError::config(format!("classifier.compile_rules: {e}")))?;
        self.classifier
            .suggestion_classifier()
            .map_err(|e| CatalogError::config(format!("classifier.suggestion_rules: {e}")))?;
        self.classifier
            .repairer()
            .map_err(|e| CatalogError::config(format!("classifier.repair_rules: {e}")))?;
        Ok(())
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Builds a [`CatalogConfig`] from every configuration source
///
/// No caching is performed; each call to [`ConfigLoader::load`] reads the
/// files again.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
    explicit_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using the home and current directories
    pub fn new() -> Self {
        Self {
            global_dir: dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME)),
            project_dir: std::env::current_dir()
                .ok()
                .map(|cwd| cwd.join(CONFIG_DIR_NAME)),
            explicit_file: None,
        }
    }

    /// Loader with custom directories, used by tests
    pub fn with_directories(global_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        Self {
            global_dir,
            project_dir,
            explicit_file: None,
        }
    }

    /// Add an explicitly named configuration file
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_file = path;
        self
    }

    /// Load and validate the configuration
    pub fn load(&self) -> Result<CatalogConfig> {
        let config: CatalogConfig = self.build_figment()?.extract()?;
        config.validate()?;
        debug!("Effective configuration: {}", Pretty(&config));
        Ok(config)
    }

    /// Configuration files that will be merged, lowest precedence first
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for dir in [&self.global_dir, &self.project_dir].into_iter().flatten() {
            if !dir.is_dir() {
                trace!("No configuration directory at {}", dir.display());
                continue;
            }
            files.extend(
                CONFIG_FILE_NAMES
                    .iter()
                    .map(|name| dir.join(name))
                    .filter(|path| path.is_file()),
            );
        }
        files
    }

    fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(CatalogConfig::default()));

        for path in self.discover() {
            trace!("Merging configuration file {}", path.display());
            figment = figment.merge(file_provider(&path)?);
        }

        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(CatalogError::FileNotFound { path: path.clone() });
            }
            figment = figment.merge(file_provider(path)?);
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    match ConfigFormat::from_path(path) {
        Some(ConfigFormat::Toml) => Ok(Figment::from(Toml::file(path))),
        Some(ConfigFormat::Yaml) => Ok(Figment::from(Yaml::file(path))),
        Some(ConfigFormat::Json) => Ok(Figment::from(Json::file(path))),
        None => Err(CatalogError::config(format!(
            "Unsupported configuration file format: {}",
            path.display()
        ))),
    }
}

/// Load the configuration from the standard locations plus an optional file
pub fn load_config(explicit_file: Option<PathBuf>) -> Result<CatalogConfig> {
    ConfigLoader::new().with_file(explicit_file).load()
}

//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::filename::DEFAULT_REVISION;
use crate::yaml::diagnostics::YamlSyntaxError;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".dwgcat.yaml";

const DEFAULT_DRAWINGS_DIR: &str = "drawings";
const DEFAULT_OUTPUT: &str = "drawings.json";
pub const DEFAULT_PAGES: u32 = 7;
pub const DEFAULT_STATUS: &str = "Released";
pub const DEFAULT_DESCRIPTION_PREFIX: &str = "Harness Drawing";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    #[diagnostic(code(dwgcat::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] YamlSyntaxError),
}

/// Catalog configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for drawing PDFs
    pub drawings_dir: Option<PathBuf>,

    /// Catalog destination file
    pub output: Option<PathBuf>,

    /// Page count written for every entry
    pub pages: Option<u32>,

    /// Release status written for every entry
    pub status: Option<String>,

    /// Revision used when a filename has none
    pub default_revision: Option<String>,

    /// Prefix of the fallback description
    pub description_prefix: Option<String>,

    /// Mine PDF text for description and date
    pub pdf_text: Option<bool>,
}

impl Config {
    /// Load configuration relative to the current directory
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&base, explicit)
    }

    /// Load configuration from all sources, merging in priority order
    ///
    /// Implicitly discovered files that fail to load are skipped with a
    /// warning. An explicitly requested file must load.
    pub fn load_from(base: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (accessors below)

        // 2. Global user config (~/.config/dwgcat/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_optional(&global_path);
        }

        // 3. Project config (.dwgcat.yaml)
        config.merge_optional(&base.join(PROJECT_CONFIG_FILE));

        // 4. Explicit --config file
        if let Some(path) = explicit {
            config.merge(Self::read_file(path)?);
        }

        Ok(config)
    }

    /// Parse a single config file
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    fn parse(contents: &str, filename: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as null
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str::<Config>(contents)
            .map_err(|e| ConfigError::Parse(YamlSyntaxError::from_serde_error(&e, contents, filename)))
    }

    fn merge_optional(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::read_file(path) {
            Ok(other) => self.merge(other),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config file"),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dwgcat")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.drawings_dir.is_some() {
            self.drawings_dir = other.drawings_dir;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.pages.is_some() {
            self.pages = other.pages;
        }
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.default_revision.is_some() {
            self.default_revision = other.default_revision;
        }
        if other.description_prefix.is_some() {
            self.description_prefix = other.description_prefix;
        }
        if other.pdf_text.is_some() {
            self.pdf_text = other.pdf_text;
        }
    }

    pub fn drawings_dir(&self) -> PathBuf {
        self.drawings_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DRAWINGS_DIR))
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn pages(&self) -> u32 {
        self.pages.unwrap_or(DEFAULT_PAGES)
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }

    pub fn default_revision(&self) -> &str {
        self.default_revision.as_deref().unwrap_or(DEFAULT_REVISION)
    }

    pub fn description_prefix(&self) -> &str {
        self.description_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DESCRIPTION_PREFIX)
    }

    pub fn pdf_text(&self) -> bool {
        self.pdf_text.unwrap_or(true)
    }
}

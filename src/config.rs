//! Configuration for the ingestion pipeline.
//!
//! Sources (highest priority first):
//! 1. CLI flags (which also read TERMFLOW_INPUT / TERMFLOW_OUTPUT env vars)
//! 2. Config file (termflow.yaml in the working directory)
//! 3. Defaults (IBT.xml, InstrumentNotification.xml)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Default input document name when nothing else is configured.
pub const DEFAULT_INPUT_FILE: &str = "IBT.xml";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "termflow.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// Resolved configuration for one ingestion cycle.
#[derive(Debug, Clone)]
pub struct Config {
    /// Term-sheet document to ingest
    pub input_path: PathBuf,

    /// Where the partner B notification file is written
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(crate::handlers::DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Config {
    /// Load from `termflow.yaml` in the given directory, falling back to
    /// defaults for anything unset. A missing file is not an error.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        debug!(path = %path.display(), "loaded config file");
        let defaults = Self::default();
        Ok(Self {
            input_path: file.input_path.unwrap_or(defaults.input_path),
            output_path: file.output_path.unwrap_or(defaults.output_path),
        })
    }

    /// Load from the current working directory.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("resolving working directory")?;
        Self::load_from(&cwd)
    }

    /// Apply CLI/env overrides on top of the loaded values.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }
}

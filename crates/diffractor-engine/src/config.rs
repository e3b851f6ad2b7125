//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! from_root = "diffs/20181119"
//! to_root = "diffs/20181126"
//! glob_pattern = "**/*.markup-only.html"
//! diff_context_lines = 5
//! similarity_threshold = 0.6
//! ```

use diffractor_core::errors::{DiffractorError, Result};
use diffractor_core::hunk::DEFAULT_CONTEXT_LINES;
use diffractor_core::similarity::DEFAULT_SIMILARITY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Root of the older snapshot
    #[serde(default)]
    pub from_root: String,
    /// Root of the newer snapshot
    #[serde(default)]
    pub to_root: String,
    #[serde(default = "default_glob_pattern")]
    pub glob_pattern: String,
    #[serde(default = "default_context_lines")]
    pub diff_context_lines: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_glob_pattern() -> String {
    "**/*.markup-only.html".to_string()
}
fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}
fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            from_root: String::new(),
            to_root: String::new(),
            glob_pattern: default_glob_pattern(),
            diff_context_lines: default_context_lines(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl EngineConfig {
    /// Defaults for everything but the two roots.
    pub fn new(from_root: impl Into<String>, to_root: impl Into<String>) -> Self {
        Self {
            from_root: from_root.into(),
            to_root: to_root.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// - `Config` for an empty root or glob pattern
    /// - `InvalidThreshold` for a threshold that is not finite or outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.from_root.trim().is_empty() {
            return Err(config_error("from_root must be set"));
        }
        if self.to_root.trim().is_empty() {
            return Err(config_error("to_root must be set"));
        }
        if self.glob_pattern.trim().is_empty() {
            return Err(config_error("glob_pattern must not be empty"));
        }
        if !self.similarity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.similarity_threshold)
        {
            return Err(DiffractorError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }
        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> DiffractorError {
    DiffractorError::Config {
        reason: reason.into(),
    }
}

/// Parse a TOML config file without validating it.
///
/// Callers that layer overrides on top validate afterwards.
///
/// # Errors
///
/// `Config` when the file cannot be read or parsed.
pub fn read_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        config_error(format!(
            "failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    toml::from_str(&content).map_err(|e| {
        config_error(format!(
            "failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Read and validate a TOML config file.
///
/// # Errors
///
/// `Config` or `InvalidThreshold` as for [`read_config`] and
/// [`EngineConfig::validate`].
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let config = read_config(path)?;
    config.validate()?;
    Ok(config)
}

//! # Runtime Configuration
//!
//! Versioned JSON configuration for the batch host. Every field has a
//! default, so a file only needs the keys it changes:
//!
//! ```json
//! { "version": 1, "failure_policy": "continue", "log_level": "debug" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use terminal_core::DEFAULT_CURSOR_MARKER;
use terminal_logger::LogLevel;
use thiserror::Error;

use crate::dataset::DatasetBounds;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid line length bounds: min {min} > max {max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// What to do with the rest of the batch when one dataset fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report the error and stop processing
    Stop,
    /// Log the error, emit the separator and move on to the next dataset
    Continue,
}

/// Batch host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Format version (for future migrations)
    pub version: u32,
    /// Largest accepted dataset count
    pub max_datasets: usize,
    /// Shortest accepted dataset line, in bytes after trimming
    pub min_line_length: usize,
    /// Longest accepted dataset line, in bytes after trimming
    pub max_line_length: usize,
    pub failure_policy: FailurePolicy,
    /// Minimum level written to the log sink
    pub log_level: String,
    /// Glyph marking the cursor in traced previews
    pub cursor_marker: char,
}

impl TerminalConfig {
    /// Current version of the config format
    pub const CURRENT_VERSION: u32 = 1;

    /// Parses and validates a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TerminalConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if config.version != Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }
        config.validate()?;

        Ok(config)
    }

    /// Reads a config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_line_length > self.max_line_length {
            return Err(ConfigError::InvalidBounds {
                min: self.min_line_length,
                max: self.max_line_length,
            });
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        LogLevel::parse(&self.log_level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn bounds(&self) -> DatasetBounds {
        DatasetBounds {
            max_datasets: self.max_datasets,
            min_line_length: self.min_line_length,
            max_line_length: self.max_line_length,
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        let bounds = DatasetBounds::default();
        Self {
            version: Self::CURRENT_VERSION,
            max_datasets: bounds.max_datasets,
            min_line_length: bounds.min_line_length,
            max_line_length: bounds.max_line_length,
            failure_policy: FailurePolicy::Stop,
            log_level: "warn".to_string(),
            cursor_marker: DEFAULT_CURSOR_MARKER,
        }
    }
}

//! Configuration management for photoinfo.
//!
//! Configuration is loaded from the platform config directory (falling back
//! to `~/.photoinfo/config.toml`). Every section has defaults, so a missing
//! file or a partial file is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::output::OutputFormat;
use crate::pipeline::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction settings
    pub extraction: ExtractionConfig,

    /// Processing settings
    pub processing: ProcessingConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.photoinfo.photoinfo/config.toml
    /// - Linux: ~/.config/photoinfo/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\photoinfo\photoinfo\config\config.toml
    ///
    /// Falls back to ~/.photoinfo/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "photoinfo", "photoinfo")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".photoinfo").join("config.toml")
            })
    }

    /// Extraction options from the `[extraction]` section.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::from(&self.extraction)
    }

    /// Output format from the `[output]` section. Validation guarantees it
    /// parses; an unvalidated config falls back to JSON.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::parse(&self.output.format).unwrap_or(OutputFormat::Json)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

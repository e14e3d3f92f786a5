//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration files and
//! saved parameter records.

use std::io;

use millpath_camtools::ParameterError;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A saved parameter record failed validation.
    #[error("Invalid parameters in '{section}': {source}")]
    InvalidParameters {
        section: String,
        #[source]
        source: ParameterError,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported settings format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// A saved parameter record does not exist.
    #[error("No saved parameters named '{0}'")]
    NotFound(String),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn parameters(section: &str, source: ParameterError) -> Self {
        Self::InvalidParameters {
            section: section.to_string(),
            source,
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

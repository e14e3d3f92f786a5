//! Configuration management for millpath
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into sections:
//! - C-shape and linear groove parameters used when a value is not given
//! - Output preferences (export directory, printing)
//! - Preview preferences (canvas size, zoom, camera)

use std::path::{Path, PathBuf};

use millpath_camtools::{AnnularParameters, LinearParameters};
use millpath_visualizer::viewport::{MAX_ZOOM, MIN_ZOOM};
use millpath_visualizer::CameraPreset;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Name of the application directory under the platform config directory.
pub const APP_DIR: &str = "millpath";
/// File name of the default configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// File formats a configuration can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("none").to_string(),
            )),
        }
    }
}

/// Where and how generated programs are delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory exported programs are written to
    pub directory: PathBuf,
    /// Also print each generated program to stdout
    pub print_to_stdout: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            print_to_stdout: false,
        }
    }
}

/// Preview rendering preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Preview width in pixels
    pub canvas_width: u32,
    /// Preview height in pixels
    pub canvas_height: u32,
    /// 2D preview zoom factor
    pub zoom: f64,
    /// Camera placement for the 3D preview
    pub camera: CameraPreset,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 400,
            zoom: 2.0,
            camera: CameraPreset::Home,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default C-shape parameters
    pub c_shape: AnnularParameters,
    /// Default linear groove parameters
    pub linear: LinearParameters,
    /// Output preferences
    pub output: OutputSettings,
    /// Preview preferences
    pub preview: PreviewSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the default configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or rejected
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "configuration rejected, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.to_string_as(ConfigFormat::from_path(path)?)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Serialize in the given format
    pub fn to_string_as(&self, format: ConfigFormat) -> SettingsResult<String> {
        Ok(match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.c_shape
            .validate()
            .map_err(|e| SettingsError::parameters("c_shape", e))?;
        self.linear
            .validate()
            .map_err(|e| SettingsError::parameters("linear", e))?;

        if self.preview.canvas_width == 0 || self.preview.canvas_height == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "preview.canvas".to_string(),
                reason: "dimensions must be > 0".to_string(),
            });
        }

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.preview.zoom) {
            return Err(SettingsError::InvalidSetting {
                key: "preview.zoom".to_string(),
                reason: format!("must be between {} and {}", MIN_ZOOM, MAX_ZOOM),
            });
        }

        Ok(())
    }
}

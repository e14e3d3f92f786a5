//! Saved parameter records.
//!
//! Each tool's parameters can be saved under a name and loaded back later.
//! Records are pretty-printed JSON files named `<name>.<tool>.json` inside
//! the store directory, and are validated both when saved and when loaded.

use std::path::{Path, PathBuf};

use millpath_camtools::{AnnularParameters, LinearParameters, ParameterResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::APP_DIR;
use crate::error::{SettingsError, SettingsResult};

/// A parameter record that can be stored by [`ParameterStore`]
pub trait ToolParameters: Serialize + DeserializeOwned {
    /// Tool name used in file names
    const TOOL: &'static str;

    fn check(&self) -> ParameterResult<()>;
}

impl ToolParameters for AnnularParameters {
    const TOOL: &'static str = "c_shape";

    fn check(&self) -> ParameterResult<()> {
        self.validate()
    }
}

impl ToolParameters for LinearParameters {
    const TOOL: &'static str = "linear";

    fn check(&self) -> ParameterResult<()> {
        self.validate()
    }
}

/// Directory of named parameter records
#[derive(Debug, Clone)]
pub struct ParameterStore {
    directory: PathBuf,
}

impl ParameterStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Store under the platform config directory
    pub fn default_location() -> SettingsResult<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR).join("parameters")))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File a record named `name` is stored in
    pub fn path_for<T: ToolParameters>(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.{}.json", name, T::TOOL))
    }

    /// Validate and save `params` under `name`, replacing any older record
    pub fn save<T: ToolParameters>(&self, name: &str, params: &T) -> SettingsResult<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            return Err(SettingsError::InvalidSetting {
                key: "name".to_string(),
                reason: format!("'{}' cannot be used as a record name", name),
            });
        }
        params
            .check()
            .map_err(|e| SettingsError::parameters(T::TOOL, e))?;

        std::fs::create_dir_all(&self.directory)?;
        let path = self.path_for::<T>(name);
        std::fs::write(&path, serde_json::to_string_pretty(params)?)?;

        tracing::info!(tool = T::TOOL, name, path = %path.display(), "saved parameters");
        Ok(path)
    }

    /// Load and validate the record saved under `name`
    pub fn load<T: ToolParameters>(&self, name: &str) -> SettingsResult<T> {
        let path = self.path_for::<T>(name);
        if !path.exists() {
            return Err(SettingsError::NotFound(name.to_string()));
        }
        let params: T = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        params
            .check()
            .map_err(|e| SettingsError::parameters(T::TOOL, e))?;
        Ok(params)
    }

    /// Names of the records saved for tool `T`, sorted
    pub fn list<T: ToolParameters>(&self) -> SettingsResult<Vec<String>> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }
        let suffix = format!(".{}.json", T::TOOL);
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let file_name = entry?.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(&suffix)) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

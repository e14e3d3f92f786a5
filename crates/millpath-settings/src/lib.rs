//! Millpath Settings Crate
//!
//! Handles application configuration and saved tool parameters.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, ConfigFormat, OutputSettings, PreviewSettings};
pub use error::{SettingsError, SettingsResult};
pub use persistence::{ParameterStore, ToolParameters};

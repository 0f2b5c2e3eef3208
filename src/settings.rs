//! User settings persistence.
//!
//! This module handles loading and saving chart preferences across sessions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::DEFAULT_LINE_WIDTH;

/// Errors that can occur while saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Config directory could not be determined
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to write settings file: {0}")]
    WriteError(std::io::Error),
}

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Width of every series line
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    /// When true, use colorblind-friendly color palette
    #[serde(default)]
    pub color_blind_mode: bool,
    /// Initial window size in logical pixels
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

fn default_version() -> u32 {
    1
}

fn default_line_width() -> f32 {
    DEFAULT_LINE_WIDTH
}

fn default_true() -> bool {
    true
}

fn default_window_size() -> [f32; 2] {
    [1280.0, 800.0]
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            line_width: default_line_width(),
            show_legend: true,
            color_blind_mode: false,
            window_size: default_window_size(),
        }
    }
}

impl ViewerSettings {
    /// Get the config directory path for SkySense
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("SkySense"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("SkySense"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("skysense"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(SettingsError::WriteError)?;

        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use pixelmark::config;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.brush_width = Some(24);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

mod defaults;
pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Pixelmark";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Brush width for the annotator, in content pixels.
    #[serde(default)]
    pub brush_width: Option<u32>,
    /// Stroke color as RGBA.
    #[serde(default)]
    pub stroke_color: Option<[u8; 4]>,
    /// File-name prefix for captured regions.
    #[serde(default)]
    pub capture_prefix: Option<String>,
    /// Directory captured regions are written to.
    #[serde(default)]
    pub capture_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brush_width: Some(DEFAULT_BRUSH_WIDTH),
            stroke_color: Some(DEFAULT_STROKE_COLOR),
            capture_prefix: Some(DEFAULT_CAPTURE_PREFIX.to_string()),
            capture_dir: None,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

//! Settings and configuration utilities.
//!
//! This module reads settings from `$HOME/.revintel/settings.json` and uses
//! them as a fallback for environment variables, so API keys can live in one
//! file instead of the shell profile.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Settings loaded from `$HOME/.revintel/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from the default location, falling back to empty
    /// settings when the file cannot be read or parsed.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = ?e, "Ignoring unreadable settings file");
            Self::default()
        })
    }

    /// Loads settings from a specific path.
    ///
    /// A missing file yields empty settings.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".revintel").join("settings.json"))
    }

    /// Returns an environment variable with fallback to these settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }

    /// Tries several variables in order and returns the first one set.
    pub fn get_env_vars(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get_env_var(key))
    }
}

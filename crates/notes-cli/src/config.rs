//! Application configuration management.
//!
//! The config file holds defaults for where settings are loaded from, which
//! credential store is used, and where users are sent to log in. Every field
//! is optional; command-line flags and environment variables take precedence.
//!
//! Configuration is stored at `~/.config/notes-client/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use notes_core::auth::DEFAULT_LOGIN_LOCATION;
use notes_core::settings::DEFAULT_SETTINGS_LOCATION;

/// Application name used for the config directory path
const APP_NAME: &str = "notes-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub settings_location: Option<String>,
    pub store: Option<StoreKind>,
    pub login_location: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Flag/env value, else config file, else the built-in default.
    pub fn settings_location(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.settings_location.clone())
            .unwrap_or_else(|| DEFAULT_SETTINGS_LOCATION.to_string())
    }

    pub fn store(&self, flag: Option<StoreKind>) -> StoreKind {
        flag.or(self.store).unwrap_or_default()
    }

    pub fn login_location(&self) -> &str {
        self.login_location
            .as_deref()
            .unwrap_or(DEFAULT_LOGIN_LOCATION)
    }
}

//! Configuration management for hookrelay CLI
//!
//! Stores the relay URL and named Mattermost destinations in
//! ~/.config/hookrelay/config.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "hookrelay";
const CONFIG_FILE: &str = "config.toml";

/// A named Mattermost incoming webhook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the relay server listens
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_destination: Option<String>,
    #[serde(default)]
    pub destinations: BTreeMap<String, Destination>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_destination: None,
            destinations: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`; a missing file yields the default
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Add or replace a destination
    pub fn add_destination(&mut self, name: String, url: String, description: Option<String>) {
        self.destinations.insert(name, Destination { url, description });
    }

    /// Remove a destination, clearing the default if it pointed there
    pub fn remove_destination(&mut self, name: &str) -> bool {
        let removed = self.destinations.remove(name).is_some();
        if removed && self.default_destination.as_deref() == Some(name) {
            self.default_destination = None;
        }
        removed
    }

    /// Set default destination
    pub fn set_default_destination(&mut self, name: String) -> bool {
        if self.destinations.contains_key(&name) {
            self.default_destination = Some(name);
            true
        } else {
            false
        }
    }

    /// Decide which webhook URL to send to
    ///
    /// An explicit URL wins, then a named destination, then the default
    /// destination. `None` leaves the choice to the relay's own default.
    pub fn resolve_webhook_url(
        &self,
        webhook_url: Option<&str>,
        destination: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(url) = webhook_url {
            return Ok(Some(url.to_string()));
        }

        let name = match destination.or(self.default_destination.as_deref()) {
            Some(name) => name,
            None => return Ok(None),
        };

        match self.destinations.get(name) {
            Some(dest) => Ok(Some(dest.url.clone())),
            None => bail!("Destination '{}' not found", name),
        }
    }
}

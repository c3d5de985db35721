use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

use crate::types::Selection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the central-api server, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Idle time after the last keystroke before a note is saved.
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
    #[serde(default)]
    pub default_station_id: Option<i32>,
    #[serde(default)]
    pub default_controller_id: Option<i32>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_autosave_delay_ms() -> u64 {
    2000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            autosave_delay_ms: default_autosave_delay_ms(),
            default_station_id: None,
            default_controller_id: None,
        }
    }
}

impl ClientConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("central")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn default_selection(&self) -> Selection {
        Selection::new(self.default_station_id, self.default_controller_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ClientConfig::parse("api_url = \"http://central.local\"\n").unwrap();

        assert_eq!(config.api_url, "http://central.local");
        assert_eq!(config.autosave_delay(), Duration::from_millis(2000));
        assert_eq!(config.default_selection(), Selection::default());
    }

    #[test]
    fn default_selection_comes_from_config() {
        let config = ClientConfig::parse(
            "autosave_delay_ms = 500\ndefault_station_id = 3\ndefault_controller_id = 9\n",
        )
        .unwrap();

        assert_eq!(config.autosave_delay(), Duration::from_millis(500));
        assert_eq!(config.default_selection(), Selection::new(Some(3), Some(9)));
    }
}

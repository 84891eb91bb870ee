//! Client settings
//!
//! Stored in settings.json under the platform config directory and created
//! with defaults on first run. The catalog base URL can also come from the
//! ATLAS_BASE_URL environment variable so containerized setups can repoint
//! the client between restarts without editing the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the catalog base URL
const BASE_URL_ENV: &str = "ATLAS_BASE_URL";

/// User-configurable client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the remote catalog service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Artists per browse page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Maximum suggestions requested per search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Quiet period before a typed query fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            search_limit: default_search_limit(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults on first run
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::settings_path()?)?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                settings.base_url = url;
            }
        }
        Ok(settings)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read settings file")?;
            serde_json::from_str(&content).context("Failed to parse settings file")
        } else {
            let settings = Self::default();
            settings.save_to(path)?;
            Ok(settings)
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")
    }

    fn settings_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "artist-atlas")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("settings.json"))
    }
}

// Default value functions for serde

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_per_page() -> u32 {
    20
}

fn default_search_limit() -> u32 {
    5
}

fn default_debounce_ms() -> u64 {
    300
}

//! Pad settings
//!
//! Settings are read from `settings.toml` in the user's config directory
//! (`~/.config/dpad/settings.toml` on Linux). A missing file or missing
//! fields fall back to defaults, so the pad always starts. A file that exists
//! but does not parse is reported as an error.
//!
//! The repeat cadence is fixed and deliberately not part of the settings.

use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "dpad";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PadSettings {
    /// Capacity of the command queue between input adapters and the pad loop
    pub command_buffer: usize,

    /// Capacity of the direction event channel used by the demo binary
    pub event_buffer: usize,

    /// Emit `None` when a release arrives while nothing is held
    pub emit_idle_release: bool,
}

impl Default for PadSettings {
    fn default() -> Self {
        Self {
            command_buffer: 64,
            event_buffer: 256,
            emit_idle_release: true,
        }
    }
}

impl PadSettings {
    /// Default location of the settings file, if a config directory exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(CONFIG_DIR);
            path.push(SETTINGS_FILE);
            path
        })
    }

    /// Loads settings from the default location, falling back to defaults
    pub async fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path).await,
            None => {
                warn!("No config directory available, using default pad settings");
                Ok(Self::default())
            }
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check settings file {}: {}", path.display(), e))?;

        if !exists {
            info!(
                "No settings file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read settings file {}: {}", path.display(), e))?;

        let settings = Self::from_toml(&content)
            .map_err(|e| eyre!("Invalid settings file {}: {}", path.display(), e))?;
        info!("Loaded pad settings from {}", path.display());
        debug!("Pad settings: {:?}", settings);
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("{}", e))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize pad settings: {}", e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write settings file {}: {}", path.display(), e))?;

        info!("Saved pad settings to {}", path.display());
        Ok(())
    }
}

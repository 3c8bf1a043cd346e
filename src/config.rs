//! Configuration for the mockup editor
//!
//! Holds the style defaults applied to newly added overlay boxes. The host
//! application loads this once per editor and may persist user preferences
//! between sessions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Style values applied to every newly added overlay box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxDefaults {
    /// CSS position property for the overlay element
    #[serde(default = "default_position")]
    pub position: String,

    /// Opacity of the box shell while editing (0.0 to 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_position() -> String {
    "absolute".to_string()
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for BoxDefaults {
    fn default() -> Self {
        Self {
            position: default_position(),
            opacity: default_opacity(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EditorConfig {
    #[serde(default)]
    pub box_defaults: BoxDefaults,
}

impl EditorConfig {
    /// Load configuration from a file, or create default if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            let config: EditorConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", path))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            let config = EditorConfig::default();
            config.save(path)?;
            tracing::info!("Created default configuration at {:?}", path);
            Ok(config)
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

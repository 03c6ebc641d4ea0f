//! Panel configuration persistence
//!
//! Stores panel preferences in `~/.config/dockpanel/config.yaml`. Every value
//! is handed to the components at construction; nothing reads this file
//! behind their back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resize::Edge;

/// Storage key shared by every resizable panel that does not override it
pub const DEFAULT_STORAGE_KEY: &str = "sidebar-width";

/// Panel configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Key the resizable size is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Size used when nothing is persisted yet
    #[serde(default = "default_size")]
    pub default_size: i64,

    /// Smallest presented size in logical pixels (6rem)
    #[serde(default = "default_min_size")]
    pub min_size: i64,

    /// Edge that carries the resize handle
    #[serde(default = "default_edge")]
    pub edge: Edge,

    /// Contribution container whose panel views are shown
    #[serde(default = "default_container")]
    pub container: String,

    /// Consecutive resubscriptions allowed after the view stream fails
    #[serde(default = "default_max_resubscribe_attempts")]
    pub max_resubscribe_attempts: u32,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_size() -> i64 {
    350
}

fn default_min_size() -> i64 {
    96
}

fn default_edge() -> Edge {
    Edge::Top
}

fn default_container() -> String {
    "panel".to_string()
}

fn default_max_resubscribe_attempts() -> u32 {
    3
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_size: default_size(),
            min_size: default_min_size(),
            edge: default_edge(),
            container: default_container(),
            max_resubscribe_attempts: default_max_resubscribe_attempts(),
        }
    }
}

impl PanelConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_resizable_panel() {
        let config = PanelConfig::default();
        assert_eq!(config.storage_key, "sidebar-width");
        assert_eq!(config.default_size, 350);
        assert_eq!(config.min_size, 96);
        assert_eq!(config.edge, Edge::Top);
        assert_eq!(config.container, "panel");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: PanelConfig = serde_yaml::from_str("edge: left\ndefault_size: 200\n").unwrap();
        assert_eq!(config.edge, Edge::Left);
        assert_eq!(config.default_size, 200);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.max_resubscribe_attempts, 3);
    }
}

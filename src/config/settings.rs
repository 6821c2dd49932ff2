//! Persisted dashboard configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use homedeck_types::{DualWidgetConfig, WidgetConfig};

/// Top-level dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Version of the config format
    pub version: u32,
    /// Dashboard items, in display order
    pub items: Vec<DashboardItem>,
}

impl DashboardConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "homedeck", "homedeck")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("dashboard.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: 1,
            items: Vec::new(),
        }
    }
}

/// One item placed on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardItem {
    /// Unique ID for this item
    pub id: Uuid,
    #[serde(flatten)]
    pub item: ItemConfig,
}

impl DashboardItem {
    pub fn new(item: ItemConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
        }
    }
}

/// The widget payload of a dashboard item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum ItemConfig {
    /// Two stacked widgets sharing one grid cell
    DualWidget(DualWidgetConfig),
    /// A single full-cell widget
    Widget(WidgetConfig),
}

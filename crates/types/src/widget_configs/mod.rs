//! Widget configuration types for all dual-widget members.

pub mod adguard;
pub mod datetime;
pub mod disk_monitor;
pub mod notes;
pub mod pihole;
pub mod system_monitor;
pub mod torrent_client;
pub mod weather;

// Re-export all widget config types for convenience
pub use adguard::AdguardConfig;
pub use datetime::{DatetimeConfig, TimeFormat};
pub use disk_monitor::DiskMonitorConfig;
pub use notes::NotesConfig;
pub use pihole::PiholeConfig;
pub use system_monitor::{GaugeKind, SystemMonitorConfig};
pub use torrent_client::{ClientKind, TorrentClientConfig};
pub use weather::{TemperatureUnit, WeatherConfig};

use serde::{Deserialize, Serialize};

/// Identifier for every widget type a dual-widget slot can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    Weather,
    Datetime,
    SystemMonitor,
    DiskMonitor,
    Pihole,
    Adguard,
    TorrentClient,
    Notes,
}

impl WidgetType {
    /// The persisted type id string.
    pub fn id(self) -> &'static str {
        match self {
            WidgetType::Weather => "weather",
            WidgetType::Datetime => "datetime",
            WidgetType::SystemMonitor => "system_monitor",
            WidgetType::DiskMonitor => "disk_monitor",
            WidgetType::Pihole => "pihole",
            WidgetType::Adguard => "adguard",
            WidgetType::TorrentClient => "torrent_client",
            WidgetType::Notes => "notes",
        }
    }

    /// All widget types, in menu order.
    pub fn all() -> [WidgetType; 8] {
        [
            WidgetType::Weather,
            WidgetType::Datetime,
            WidgetType::SystemMonitor,
            WidgetType::DiskMonitor,
            WidgetType::Pihole,
            WidgetType::Adguard,
            WidgetType::TorrentClient,
            WidgetType::Notes,
        ]
    }
}

/// Type-safe enum over every widget configuration.
///
/// Serializes to the persisted slot shape: `{"type": "weather", "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum WidgetConfig {
    #[serde(rename = "weather")]
    Weather(WeatherConfig),

    #[serde(rename = "datetime")]
    Datetime(DatetimeConfig),

    #[serde(rename = "system_monitor")]
    SystemMonitor(SystemMonitorConfig),

    #[serde(rename = "disk_monitor")]
    DiskMonitor(DiskMonitorConfig),

    #[serde(rename = "pihole")]
    Pihole(PiholeConfig),

    #[serde(rename = "adguard")]
    Adguard(AdguardConfig),

    #[serde(rename = "torrent_client")]
    TorrentClient(TorrentClientConfig),

    #[serde(rename = "notes")]
    Notes(NotesConfig),
}

impl WidgetConfig {
    /// Get the widget type of this configuration.
    pub fn widget_type(&self) -> WidgetType {
        match self {
            WidgetConfig::Weather(_) => WidgetType::Weather,
            WidgetConfig::Datetime(_) => WidgetType::Datetime,
            WidgetConfig::SystemMonitor(_) => WidgetType::SystemMonitor,
            WidgetConfig::DiskMonitor(_) => WidgetType::DiskMonitor,
            WidgetConfig::Pihole(_) => WidgetType::Pihole,
            WidgetConfig::Adguard(_) => WidgetType::Adguard,
            WidgetConfig::TorrentClient(_) => WidgetType::TorrentClient,
            WidgetConfig::Notes(_) => WidgetType::Notes,
        }
    }

    /// Create a default configuration for a given widget type.
    pub fn default_for_type(widget_type: WidgetType) -> Self {
        match widget_type {
            WidgetType::Weather => WidgetConfig::Weather(WeatherConfig::default()),
            WidgetType::Datetime => WidgetConfig::Datetime(DatetimeConfig::default()),
            WidgetType::SystemMonitor => {
                WidgetConfig::SystemMonitor(SystemMonitorConfig::default())
            }
            WidgetType::DiskMonitor => WidgetConfig::DiskMonitor(DiskMonitorConfig::default()),
            WidgetType::Pihole => WidgetConfig::Pihole(PiholeConfig::default()),
            WidgetType::Adguard => WidgetConfig::Adguard(AdguardConfig::default()),
            WidgetType::TorrentClient => {
                WidgetConfig::TorrentClient(TorrentClientConfig::default())
            }
            WidgetType::Notes => WidgetConfig::Notes(NotesConfig::default()),
        }
    }
}

//! System monitor widget configuration types.

use serde::{Deserialize, Serialize};

/// What a single gauge in the system monitor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeKind {
    Cpu,
    Ram,
    Network,
    Temp,
}

impl GaugeKind {
    pub fn id(self) -> &'static str {
        match self {
            GaugeKind::Cpu => "cpu",
            GaugeKind::Ram => "ram",
            GaugeKind::Network => "network",
            GaugeKind::Temp => "temp",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "cpu" => Some(GaugeKind::Cpu),
            "ram" => Some(GaugeKind::Ram),
            "network" => Some(GaugeKind::Network),
            "temp" => Some(GaugeKind::Temp),
            _ => None,
        }
    }
}

fn default_gauges() -> Vec<GaugeKind> {
    vec![GaugeKind::Cpu, GaugeKind::Temp, GaugeKind::Ram]
}

/// System monitor widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMonitorConfig {
    /// The three gauges, left to right.
    #[serde(default = "default_gauges")]
    pub gauges: Vec<GaugeKind>,
    /// Interface the network gauge reads; None picks the busiest one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_interface: Option<String>,
}

impl Default for SystemMonitorConfig {
    fn default() -> Self {
        Self {
            gauges: default_gauges(),
            network_interface: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gauges() {
        let config = SystemMonitorConfig::default();
        assert_eq!(
            config.gauges,
            vec![GaugeKind::Cpu, GaugeKind::Temp, GaugeKind::Ram]
        );
    }

    #[test]
    fn test_gauge_serialization() {
        let json = serde_json::to_value(&SystemMonitorConfig::default()).unwrap();
        assert_eq!(json["gauges"][0], "cpu");
        assert!(json.get("networkInterface").is_none());
    }
}

//! Weather widget configuration types.

use serde::{Deserialize, Serialize};

use crate::field::LocationRef;

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn id(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "celsius" => Some(TemperatureUnit::Celsius),
            "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }
}

/// Weather widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConfig {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    /// Geocoded forecast location; picked via the location search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let config = WeatherConfig {
            temperature_unit: TemperatureUnit::Fahrenheit,
            location: Some(LocationRef {
                name: "Paris".to_string(),
                latitude: 48.85,
                longitude: 2.35,
            }),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["temperatureUnit"], "fahrenheit");
        assert_eq!(json["location"]["latitude"], 48.85);
    }

    #[test]
    fn test_absent_location_is_omitted() {
        let json = serde_json::to_value(WeatherConfig::default()).unwrap();
        assert!(json.get("location").is_none());
    }
}

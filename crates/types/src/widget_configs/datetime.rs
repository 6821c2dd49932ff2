//! Date & time widget configuration types.

use serde::{Deserialize, Serialize};

/// Time format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeFormat {
    #[serde(rename = "24h")]
    #[default]
    Hour24,
    #[serde(rename = "12h")]
    Hour12,
}

impl TimeFormat {
    pub fn id(self) -> &'static str {
        match self {
            TimeFormat::Hour24 => "24h",
            TimeFormat::Hour12 => "12h",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "24h" => Some(TimeFormat::Hour24),
            "12h" => Some(TimeFormat::Hour12),
            _ => None,
        }
    }
}

/// Date & time widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatetimeConfig {
    /// IANA timezone id (e.g. "Europe/London"). Empty means "follow the
    /// viewing client's timezone" and is a deliberate, persistable choice.
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub time_format: TimeFormat,
}

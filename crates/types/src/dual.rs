//! Persisted dual-widget slot pair.

use serde::{Deserialize, Serialize};

use crate::field::SlotId;
use crate::widget_configs::WidgetConfig;

/// The two stacked widget slots of a dual-widget dashboard item.
///
/// Either slot may be empty; an empty pair is a valid (if useless) item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DualWidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_widget: Option<WidgetConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_widget: Option<WidgetConfig>,
}

impl DualWidgetConfig {
    pub fn slot(&self, slot: SlotId) -> Option<&WidgetConfig> {
        match slot {
            SlotId::Top => self.top_widget.as_ref(),
            SlotId::Bottom => self.bottom_widget.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: SlotId, config: Option<WidgetConfig>) {
        match slot {
            SlotId::Top => self.top_widget = config,
            SlotId::Bottom => self.bottom_widget = config,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top_widget.is_none() && self.bottom_widget.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget_configs::DatetimeConfig;

    #[test]
    fn test_slot_keys_are_camel_case() {
        let config = DualWidgetConfig {
            top_widget: Some(WidgetConfig::Datetime(DatetimeConfig::default())),
            bottom_widget: None,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["topWidget"]["type"], "datetime");
        assert!(json.get("bottomWidget").is_none());
    }

    #[test]
    fn test_set_slot() {
        let mut config = DualWidgetConfig::default();
        assert!(config.is_empty());
        config.set_slot(
            SlotId::Bottom,
            Some(WidgetConfig::Datetime(DatetimeConfig::default())),
        );
        assert!(!config.is_empty());
        assert!(config.slot(SlotId::Top).is_none());
        assert!(config.slot(SlotId::Bottom).is_some());
    }
}

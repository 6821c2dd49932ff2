//! Notes widget configuration types.

use serde::{Deserialize, Serialize};

fn default_font_size() -> u32 {
    14
}

/// Notes widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesConfig {
    /// Editor font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_size() {
        assert_eq!(NotesConfig::default().font_size, 14);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: NotesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.font_size, 14);
    }
}

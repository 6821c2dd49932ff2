//! Disk monitor widget configuration types.

use serde::{Deserialize, Serialize};

use crate::field::DiskSelection;

/// Disk monitor widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiskMonitorConfig {
    /// Monitored mounts, in display order. Mounts must be unique.
    #[serde(default)]
    pub selected_disks: Vec<DiskSelection>,
}

impl DiskMonitorConfig {
    /// True when two selections point at the same mount path.
    pub fn has_duplicate_mounts(&self) -> bool {
        for (i, disk) in self.selected_disks.iter().enumerate() {
            if self.selected_disks[..i].iter().any(|d| d.mount == disk.mount) {
                return true;
            }
        }
        false
    }
}

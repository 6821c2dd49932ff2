//! Form field identifiers and values shared by the configuration forms.

use serde::{Deserialize, Serialize};

use crate::secret::SecretState;

/// One of the two positions inside a dual widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Top,
    Bottom,
}

impl SlotId {
    /// The opposite slot.
    pub fn other(self) -> Self {
        match self {
            SlotId::Top => SlotId::Bottom,
            SlotId::Bottom => SlotId::Top,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotId::Top => "top",
            SlotId::Bottom => "bottom",
        }
    }
}

/// Every form field the configuration forms can hold, across all widget types.
///
/// A closed enum instead of prefixed string keys: the slot lives in
/// [`FieldRef`], so there is no `top_`/`bottom_` name mangling anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    // Weather
    Location,
    TemperatureUnit,
    // Date & time
    Timezone,
    TimeFormat,
    // System monitor
    Gauge1,
    Gauge2,
    Gauge3,
    NetworkInterface,
    // Disk monitor
    SelectedDisks,
    // Service widgets (Pi-hole, AdGuard, torrent client)
    Host,
    Port,
    Ssl,
    Username,
    Password,
    ApiToken,
    ClientKind,
    // Notes
    FontSize,
}

/// Fully qualified field key: which slot a field belongs to, plus the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub slot: SlotId,
    pub field: FieldId,
}

impl FieldRef {
    pub fn new(slot: SlotId, field: FieldId) -> Self {
        Self { slot, field }
    }
}

/// What kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    Location,
    Disks,
    Secret,
}

/// A geocoded place selected in a location picker. Immutable once chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One monitored mount in a disk-monitor widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSelection {
    pub mount: String,
    #[serde(default)]
    pub custom_name: String,
    #[serde(default)]
    pub show_mount_path: bool,
}

/// A single form field value.
///
/// Sensitive fields hold a [`SecretState`] rather than raw text, so the
/// engine can distinguish "keep the saved secret" from "replace it" without
/// comparing against the display mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Location(LocationRef),
    Disks(Vec<DiskSelection>),
    Secret(SecretState),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&LocationRef> {
        match self {
            FieldValue::Location(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_disks(&self) -> Option<&[DiskSelection]> {
        match self {
            FieldValue::Disks(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_secret(&self) -> Option<&SecretState> {
        match self {
            FieldValue::Secret(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Text("")`. An empty string is still a *present* value; a
    /// deliberately cleared timezone must survive snapshot round-trips.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

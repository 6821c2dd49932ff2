//! homedeck-types: Shared configuration data types for the homedeck dashboard.
//!
//! This crate contains pure data types (field identifiers and values, secret
//! states, per-widget configuration structs, the dual-widget layout) shared
//! between the form engine and the persisted dashboard configuration. These
//! types carry no engine or service dependencies, making them suitable as a
//! foundation layer.

pub mod dual;
pub mod field;
pub mod secret;
pub mod widget_configs;

// Re-export commonly used types at the crate root for convenience
pub use dual::DualWidgetConfig;
pub use field::{DiskSelection, FieldId, FieldKind, FieldRef, FieldValue, LocationRef, SlotId};
pub use secret::{SecretKind, SecretState, MASK_TOKEN};
pub use widget_configs::{
    AdguardConfig, ClientKind, DatetimeConfig, DiskMonitorConfig, GaugeKind, NotesConfig,
    PiholeConfig, SystemMonitorConfig, TemperatureUnit, TimeFormat, TorrentClientConfig,
    WeatherConfig, WidgetConfig, WidgetType,
};

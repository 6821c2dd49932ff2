//! Persisted dashboard configuration file handling.

pub mod settings;

pub use settings::{DashboardConfig, DashboardItem, ItemConfig};

//! Registry mapping widget types to their form schemas.

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use homedeck_types::WidgetType;

use super::schema::{
    adguard_schema, datetime_schema, disk_monitor_schema, notes_schema, pihole_schema,
    system_monitor_schema, torrent_client_schema, weather_schema, WidgetSchema,
};

/// Registry of widget schemas.
///
/// Built-in widgets are registered up front; the map stays open so a future
/// plugin surface can add schemas at runtime.
pub struct SchemaRegistry {
    schemas: HashMap<WidgetType, WidgetSchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create a registry with every built-in widget schema registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(weather_schema());
        registry.register(datetime_schema());
        registry.register(system_monitor_schema());
        registry.register(disk_monitor_schema());
        registry.register(pihole_schema());
        registry.register(adguard_schema());
        registry.register(torrent_client_schema());
        registry.register(notes_schema());
        registry
    }

    /// Register a schema under its widget type.
    pub fn register(&mut self, schema: WidgetSchema) {
        self.schemas.insert(schema.widget_type, schema);
    }

    /// Look up the schema for a widget type.
    pub fn schema_for(&self, widget_type: WidgetType) -> Result<&WidgetSchema> {
        self.schemas
            .get(&widget_type)
            .ok_or_else(|| anyhow!("Unknown widget type: {}", widget_type.id()))
    }

    /// List all registered widget types
    pub fn widget_types(&self) -> Vec<WidgetType> {
        self.schemas.keys().copied().collect()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

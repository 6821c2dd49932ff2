//! Dual-widget configuration orchestrator.
//!
//! One form edits two stacked widget slots behind a top/bottom tab switcher.
//! Each slot keeps its own snapshot buffer so that switching tabs, or
//! switching a slot's widget type away and back, restores exactly the values
//! the user left behind, including deliberately emptied fields.

use std::collections::HashMap;

use anyhow::Result;
use log::warn;

use homedeck_types::{
    DualWidgetConfig, FieldId, FieldRef, FieldValue, SlotId, WidgetType,
};

use crate::core::SchemaRegistry;

use super::error::FormError;
use super::panel::SlotPanel;
use super::secrets::{apply_secret_input, ExistingSecrets, SecretCipher};
use super::session::FormSession;

/// Saved state of one slot: its widget type and field values at capture time.
#[derive(Debug, Clone, Default)]
struct SlotSnapshot {
    widget_type: Option<WidgetType>,
    values: HashMap<FieldId, FieldValue>,
}

#[derive(Debug, Default)]
struct SlotState {
    widget_type: Option<WidgetType>,
    snapshot: Option<SlotSnapshot>,
}

/// State machine behind one open dual-widget configuration form.
pub struct DualSlotForm<'a> {
    registry: &'a SchemaRegistry,
    session: FormSession,
    existing: ExistingSecrets,
    active_slot: SlotId,
    top: SlotState,
    bottom: SlotState,
    initialized: bool,
}

impl<'a> DualSlotForm<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            session: FormSession::new(),
            existing: ExistingSecrets::default(),
            active_slot: SlotId::Top,
            top: SlotState::default(),
            bottom: SlotState::default(),
            initialized: false,
        }
    }

    fn state(&self, slot: SlotId) -> &SlotState {
        match slot {
            SlotId::Top => &self.top,
            SlotId::Bottom => &self.bottom,
        }
    }

    fn state_mut(&mut self, slot: SlotId) -> &mut SlotState {
        match slot {
            SlotId::Top => &mut self.top,
            SlotId::Bottom => &mut self.bottom,
        }
    }

    pub fn active_slot(&self) -> SlotId {
        self.active_slot
    }

    pub fn widget_type(&self, slot: SlotId) -> Option<WidgetType> {
        self.state(slot).widget_type
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Populate the form from a persisted dual-widget config.
    ///
    /// Runs once per form lifetime; re-entry (a double mount event) is
    /// ignored so it cannot wipe in-progress edits.
    pub fn initialize(&mut self, config: &DualWidgetConfig) -> Result<()> {
        if self.initialized {
            warn!("Dual-widget form initialized twice; ignoring");
            return Ok(());
        }
        self.initialized = true;

        for slot in [SlotId::Top, SlotId::Bottom] {
            if let Some(widget) = config.slot(slot) {
                let widget_type = widget.widget_type();
                let schema = self.registry.schema_for(widget_type)?;
                let panel = SlotPanel::new(schema, slot);
                panel.load_config(&mut self.session, &mut self.existing, widget);
                panel.apply_defaults(&mut self.session);
                self.state_mut(slot).widget_type = Some(widget_type);
                self.capture_snapshot(slot);
            }
        }
        Ok(())
    }

    /// Record the current live values of a slot into its snapshot buffer.
    fn capture_snapshot(&mut self, slot: SlotId) {
        let snapshot = SlotSnapshot {
            widget_type: self.state(slot).widget_type,
            values: self.session.slot_values(slot),
        };
        self.state_mut(slot).snapshot = Some(snapshot);
    }

    /// Restore a slot's fields from its snapshot, keeping only the fields its
    /// current widget type's schema names.
    fn restore_snapshot(&mut self, slot: SlotId) -> Result<()> {
        let Some(widget_type) = self.state(slot).widget_type else {
            return Ok(());
        };
        let Some(snapshot) = self.state(slot).snapshot.clone() else {
            return Ok(());
        };
        let schema = self.registry.schema_for(widget_type)?;

        self.session.clear_slot(slot);
        for (field, value) in snapshot.values {
            if schema.has_field(field) {
                self.session.set(FieldRef::new(slot, field), value);
            }
        }
        Ok(())
    }

    /// Switch the active tab. The outgoing slot is captured first, then the
    /// incoming slot's own values are restored.
    pub fn switch_slot(&mut self, slot: SlotId) -> Result<()> {
        if slot == self.active_slot {
            return Ok(());
        }
        self.capture_snapshot(self.active_slot);
        self.active_slot = slot;
        self.restore_snapshot(slot)
    }

    /// Select a widget type for a slot.
    ///
    /// Re-selecting the type held by the slot's snapshot restores the saved
    /// values; any other type starts from schema defaults.
    pub fn set_widget_type(&mut self, slot: SlotId, widget_type: WidgetType) -> Result<()> {
        let schema = self.registry.schema_for(widget_type)?;
        let matches_snapshot = self
            .state(slot)
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.widget_type == Some(widget_type));

        self.session.clear_slot(slot);
        self.state_mut(slot).widget_type = Some(widget_type);

        if matches_snapshot {
            self.restore_snapshot(slot)?;
        }
        // Defaults fill whatever the snapshot did not carry.
        SlotPanel::new(schema, slot).apply_defaults(&mut self.session);
        Ok(())
    }

    /// Deselect a slot's widget entirely; the slot submits as unconfigured.
    pub fn clear_widget_type(&mut self, slot: SlotId) {
        self.session.clear_slot(slot);
        let state = self.state_mut(slot);
        state.widget_type = None;
        state.snapshot = None;
    }

    /// Set a plain field on the active slot.
    pub fn set_field(&mut self, field: FieldId, value: FieldValue) {
        let field_ref = FieldRef::new(self.active_slot, field);
        self.session.set(field_ref, value);
        self.session.clear_error(field_ref);
    }

    /// Feed raw text from a secret entry on the active slot through the
    /// masking layer.
    pub fn secret_input(&mut self, field: FieldId, input: &str) -> Result<()> {
        let Some(widget_type) = self.state(self.active_slot).widget_type else {
            return Ok(());
        };
        let schema = self.registry.schema_for(widget_type)?;
        apply_secret_input(
            &mut self.session,
            schema,
            &self.existing,
            self.active_slot,
            field,
            input,
        );
        Ok(())
    }

    /// Validate both slots and serialize them to the persisted shape.
    ///
    /// Both slots are captured and read from live values; the user does not
    /// have to visit a tab for it to be saved. Any validation failure rejects
    /// the whole submit and leaves the per-field errors in the session.
    pub fn submit(&mut self, cipher: &dyn SecretCipher) -> Result<DualWidgetConfig, FormError> {
        self.capture_snapshot(SlotId::Top);
        self.capture_snapshot(SlotId::Bottom);

        let mut failed = Vec::new();
        for slot in [SlotId::Top, SlotId::Bottom] {
            if let Some(widget_type) = self.state(slot).widget_type {
                let schema = self.registry.schema_for(widget_type)?;
                failed.extend(SlotPanel::new(schema, slot).validate(&mut self.session));
            }
        }
        if !failed.is_empty() {
            return Err(FormError::Validation { failed });
        }

        let mut config = DualWidgetConfig::default();
        for slot in [SlotId::Top, SlotId::Bottom] {
            if let Some(widget_type) = self.state(slot).widget_type {
                let schema = self.registry.schema_for(widget_type)?;
                let widget = SlotPanel::new(schema, slot).build_config(
                    &self.session,
                    &self.existing,
                    cipher,
                );
                config.set_slot(slot, Some(widget));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::error::FieldErrorKind;
    use homedeck_types::{
        DatetimeConfig, DiskSelection, GaugeKind, PiholeConfig, SecretKind, SecretState,
    };

    struct StubCipher;

    impl SecretCipher for StubCipher {
        fn encrypt(&self, _kind: SecretKind, plaintext: &str) -> anyhow::Result<String> {
            Ok(format!("enc:{plaintext}"))
        }
    }

    fn registry() -> SchemaRegistry {
        SchemaRegistry::with_builtins()
    }

    #[test]
    fn test_initialize_is_guarded_against_reentry() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        let config = DualWidgetConfig {
            top_widget: Some(WidgetConfig::Datetime(DatetimeConfig {
                timezone: "Europe/London".to_string(),
                ..Default::default()
            })),
            bottom_widget: None,
        };
        form.initialize(&config).unwrap();
        form.set_field(FieldId::Timezone, FieldValue::Text("Asia/Tokyo".to_string()));

        // A second mount event must not wipe the live edit.
        form.initialize(&config).unwrap();
        let timezone = FieldRef::new(SlotId::Top, FieldId::Timezone);
        assert_eq!(
            form.session().get(timezone).and_then(|v| v.as_text()),
            Some("Asia/Tokyo")
        );
    }

    #[test]
    fn test_tab_switch_round_trip_restores_empty_strings() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        form.initialize(&DualWidgetConfig::default()).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::Datetime).unwrap();
        form.set_widget_type(SlotId::Bottom, WidgetType::Datetime).unwrap();

        // Deliberately clear the top timezone, then bounce through the
        // bottom tab and back.
        form.set_field(FieldId::Timezone, FieldValue::Text(String::new()));
        form.switch_slot(SlotId::Bottom).unwrap();
        form.set_field(FieldId::Timezone, FieldValue::Text("Asia/Tokyo".to_string()));
        form.switch_slot(SlotId::Top).unwrap();

        let top_tz = FieldRef::new(SlotId::Top, FieldId::Timezone);
        let bottom_tz = FieldRef::new(SlotId::Bottom, FieldId::Timezone);
        assert!(form.session().get(top_tz).unwrap().is_empty_text());
        assert_eq!(
            form.session().get(bottom_tz).and_then(|v| v.as_text()),
            Some("Asia/Tokyo")
        );
    }

    #[test]
    fn test_same_type_in_both_slots_does_not_bleed() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        form.initialize(&DualWidgetConfig::default()).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::Datetime).unwrap();
        form.set_field(FieldId::Timezone, FieldValue::Text("Europe/London".to_string()));

        form.switch_slot(SlotId::Bottom).unwrap();
        form.set_widget_type(SlotId::Bottom, WidgetType::Datetime).unwrap();

        let bottom_tz = FieldRef::new(SlotId::Bottom, FieldId::Timezone);
        // The bottom slot starts from defaults, not the top slot's value.
        assert_eq!(
            form.session().get(bottom_tz).and_then(|v| v.as_text()),
            Some("")
        );
    }

    #[test]
    fn test_reselecting_type_restores_snapshot() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        form.initialize(&DualWidgetConfig::default()).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::Datetime).unwrap();
        form.set_field(FieldId::Timezone, FieldValue::Text("Europe/London".to_string()));

        // Switching away captures the snapshot.
        form.switch_slot(SlotId::Bottom).unwrap();
        form.switch_slot(SlotId::Top).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::Weather).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::Datetime).unwrap();

        let timezone = FieldRef::new(SlotId::Top, FieldId::Timezone);
        assert_eq!(
            form.session().get(timezone).and_then(|v| v.as_text()),
            Some("Europe/London")
        );
    }

    #[test]
    fn test_submit_without_tab_switch_serializes_both_slots() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        let config = DualWidgetConfig {
            top_widget: Some(WidgetConfig::Datetime(DatetimeConfig::default())),
            bottom_widget: Some(WidgetConfig::Notes(Default::default())),
        };
        form.initialize(&config).unwrap();

        // Only the top tab is ever active.
        form.set_field(FieldId::Timezone, FieldValue::Text("Europe/London".to_string()));
        let out = form.submit(&StubCipher).unwrap();

        assert!(matches!(
            out.top_widget,
            Some(WidgetConfig::Datetime(ref cfg)) if cfg.timezone == "Europe/London"
        ));
        assert!(matches!(out.bottom_widget, Some(WidgetConfig::Notes(_))));
    }

    #[test]
    fn test_weather_and_system_monitor_scenario() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        form.initialize(&DualWidgetConfig::default()).unwrap();

        form.set_widget_type(SlotId::Top, WidgetType::Weather).unwrap();
        form.switch_slot(SlotId::Bottom).unwrap();
        form.set_widget_type(SlotId::Bottom, WidgetType::SystemMonitor).unwrap();
        form.set_field(FieldId::Gauge1, FieldValue::Text("cpu".to_string()));
        form.set_field(FieldId::Gauge2, FieldValue::Text("network".to_string()));

        let out = form.submit(&StubCipher).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["topWidget"]["type"], "weather");
        assert_eq!(json["topWidget"]["config"]["temperatureUnit"], "celsius");
        assert_eq!(json["bottomWidget"]["type"], "system_monitor");
        assert_eq!(
            json["bottomWidget"]["config"]["gauges"],
            serde_json::json!(["cpu", "network", "ram"])
        );

        match out.bottom_widget {
            Some(WidgetConfig::SystemMonitor(cfg)) => {
                assert_eq!(
                    cfg.gauges,
                    vec![GaugeKind::Cpu, GaugeKind::Network, GaugeKind::Ram]
                );
            }
            other => panic!("unexpected bottom widget: {other:?}"),
        }
    }

    #[test]
    fn test_untouched_pihole_token_round_trips_as_flag() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        let config = DualWidgetConfig {
            top_widget: Some(WidgetConfig::Pihole(PiholeConfig {
                host: "pi.hole".to_string(),
                api_token: Some("stored-ciphertext".to_string()),
                ..Default::default()
            })),
            bottom_widget: None,
        };
        form.initialize(&config).unwrap();

        // The user opens and submits without touching the token field.
        let out = form.submit(&StubCipher).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["topWidget"]["config"]["_hasApiToken"], true);
        assert!(json["topWidget"]["config"].get("apiToken").is_none());
    }

    #[test]
    fn test_disk_monitor_submit_fails_closed_without_disks() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        form.initialize(&DualWidgetConfig::default()).unwrap();
        form.set_widget_type(SlotId::Top, WidgetType::DiskMonitor).unwrap();

        let err = form.submit(&StubCipher).unwrap_err();
        let disks = FieldRef::new(SlotId::Top, FieldId::SelectedDisks);
        match err {
            FormError::Validation { failed } => assert_eq!(failed, vec![disks]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            form.session().error(disks),
            Some(FieldErrorKind::NoDisksSelected)
        );

        // Adding a disk clears the failure on the next submit.
        form.set_field(
            FieldId::SelectedDisks,
            FieldValue::Disks(vec![DiskSelection {
                mount: "/".to_string(),
                custom_name: String::new(),
                show_mount_path: false,
            }]),
        );
        let out = form.submit(&StubCipher).unwrap();
        assert!(matches!(out.top_widget, Some(WidgetConfig::DiskMonitor(_))));
    }

    #[test]
    fn test_replacing_secret_displaces_sibling_through_form() {
        let registry = registry();
        let mut form = DualSlotForm::new(&registry);
        let config = DualWidgetConfig {
            top_widget: Some(WidgetConfig::Pihole(PiholeConfig {
                host: "pi.hole".to_string(),
                api_token: Some("stored-ciphertext".to_string()),
                ..Default::default()
            })),
            bottom_widget: None,
        };
        form.initialize(&config).unwrap();
        form.secret_input(FieldId::Password, "hunter2").unwrap();

        let token = FieldRef::new(SlotId::Top, FieldId::ApiToken);
        assert_eq!(
            form.session().get(token).and_then(|v| v.as_secret()).cloned(),
            Some(SecretState::Cleared)
        );

        let out = form.submit(&StubCipher).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["topWidget"]["config"]["password"], "enc:hunter2");
        assert!(json["topWidget"]["config"].get("apiToken").is_none());
        assert!(json["topWidget"]["config"].get("_hasApiToken").is_none());
    }
}

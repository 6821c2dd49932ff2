//! Per-slot configuration panel logic: defaults, loading a persisted config
//! into the session, validation, and building the typed config back out.

use log::warn;

use homedeck_types::{
    AdguardConfig, ClientKind, DatetimeConfig, DiskMonitorConfig, FieldId, FieldKind, FieldRef,
    FieldValue, GaugeKind, NotesConfig, PiholeConfig, SecretKind, SecretState, SlotId,
    SystemMonitorConfig, TemperatureUnit, TimeFormat, TorrentClientConfig, WeatherConfig,
    WidgetConfig, WidgetType, MASK_TOKEN,
};

use crate::core::{Requirement, WidgetSchema};

use super::error::FieldErrorKind;
use super::secrets::{serialize_secret, ExistingSecrets, SecretCipher, SecretOutput};
use super::session::FormSession;

/// Schema-driven view over one slot of the form session.
pub struct SlotPanel<'a> {
    schema: &'a WidgetSchema,
    slot: SlotId,
}

impl<'a> SlotPanel<'a> {
    pub fn new(schema: &'a WidgetSchema, slot: SlotId) -> Self {
        Self { schema, slot }
    }

    fn field_ref(&self, id: FieldId) -> FieldRef {
        FieldRef::new(self.slot, id)
    }

    /// Apply schema defaults to fields that are currently absent.
    ///
    /// Idempotent: a field that already holds a value, including an empty
    /// string, is left alone.
    pub fn apply_defaults(&self, session: &mut FormSession) {
        for (id, value) in &self.schema.defaults {
            let field_ref = self.field_ref(*id);
            if !session.contains(field_ref) {
                session.set(field_ref, value.clone());
            }
        }
    }

    /// A field is present when it carries a real value: non-empty and not the
    /// mask token for text, a non-empty list for disks, a live secret state
    /// for secrets.
    fn field_present(&self, session: &FormSession, id: FieldId) -> bool {
        match session.get(self.field_ref(id)) {
            None => false,
            Some(FieldValue::Text(s)) => !s.is_empty() && s != MASK_TOKEN,
            Some(FieldValue::Number(_) | FieldValue::Flag(_) | FieldValue::Location(_)) => true,
            Some(FieldValue::Disks(disks)) => !disks.is_empty(),
            Some(FieldValue::Secret(state)) => state.is_present(),
        }
    }

    /// Validate this slot, recording a field error for every failure.
    ///
    /// Returns the failed fields; empty means the slot may be submitted.
    pub fn validate(&self, session: &mut FormSession) -> Vec<FieldRef> {
        let mut failed = Vec::new();

        for spec in &self.schema.fields {
            let field_ref = self.field_ref(spec.id);
            session.clear_error(field_ref);

            if spec.kind == FieldKind::Disks {
                match session.get(field_ref).and_then(|v| v.as_disks()) {
                    None | Some([]) => {
                        session.set_error(field_ref, FieldErrorKind::NoDisksSelected);
                        failed.push(field_ref);
                    }
                    Some(disks) => {
                        let mut seen = std::collections::HashSet::new();
                        if disks.iter().any(|d| !seen.insert(d.mount.as_str())) {
                            session.set_error(field_ref, FieldErrorKind::DuplicateMount);
                            failed.push(field_ref);
                        }
                    }
                }
                continue;
            }

            let required = match spec.required {
                Requirement::Never => false,
                Requirement::Always => true,
                Requirement::IfPeerPresent(peer) => self.field_present(session, peer),
            };
            if !required {
                continue;
            }

            // An explicitly cleared secret is a removal, not a missing value;
            // it must not force the user to retype something.
            if let Some(FieldValue::Secret(SecretState::Cleared)) = session.get(field_ref) {
                continue;
            }

            if !self.field_present(session, spec.id) {
                session.set_error(field_ref, FieldErrorKind::Required);
                failed.push(field_ref);
            }
        }

        failed
    }

    /// Load a persisted widget config into this slot's session fields.
    ///
    /// Stored secrets become `KeepExisting` states (the ciphertext never
    /// enters the form) and are recorded in `existing`.
    pub fn load_config(
        &self,
        session: &mut FormSession,
        existing: &mut ExistingSecrets,
        config: &WidgetConfig,
    ) {
        match config {
            WidgetConfig::Weather(cfg) => {
                self.set_text(session, FieldId::TemperatureUnit, cfg.temperature_unit.id());
                if let Some(location) = &cfg.location {
                    session.set(
                        self.field_ref(FieldId::Location),
                        FieldValue::Location(location.clone()),
                    );
                }
            }
            WidgetConfig::Datetime(cfg) => {
                self.set_text(session, FieldId::Timezone, &cfg.timezone);
                self.set_text(session, FieldId::TimeFormat, cfg.time_format.id());
            }
            WidgetConfig::SystemMonitor(cfg) => {
                let slots = [FieldId::Gauge1, FieldId::Gauge2, FieldId::Gauge3];
                for (field, gauge) in slots.iter().zip(cfg.gauges.iter()) {
                    self.set_text(session, *field, gauge.id());
                }
                if let Some(interface) = &cfg.network_interface {
                    self.set_text(session, FieldId::NetworkInterface, interface);
                }
            }
            WidgetConfig::DiskMonitor(cfg) => {
                session.set(
                    self.field_ref(FieldId::SelectedDisks),
                    FieldValue::Disks(cfg.selected_disks.clone()),
                );
            }
            WidgetConfig::Pihole(cfg) => {
                self.set_text(session, FieldId::Host, &cfg.host);
                self.set_port(session, cfg.port);
                session.set(self.field_ref(FieldId::Ssl), FieldValue::Flag(cfg.ssl));

                let has_token = cfg.api_token.is_some() || cfg.has_api_token == Some(true);
                let has_password = cfg.password.is_some() || cfg.has_password == Some(true);
                if has_token && has_password {
                    // The credentials are mutually exclusive; a config that
                    // carries both is malformed. The token takes precedence.
                    warn!(
                        "Pi-hole config carries both an API token and a password; \
                         dropping the password"
                    );
                }
                if has_token {
                    self.load_existing_secret(session, existing, FieldId::ApiToken);
                } else if has_password {
                    self.load_existing_secret(session, existing, FieldId::Password);
                }
            }
            WidgetConfig::Adguard(cfg) => {
                self.set_text(session, FieldId::Host, &cfg.host);
                self.set_port(session, cfg.port);
                session.set(self.field_ref(FieldId::Ssl), FieldValue::Flag(cfg.ssl));
                if cfg.username.is_some() || cfg.has_username == Some(true) {
                    self.load_existing_secret(session, existing, FieldId::Username);
                }
                if cfg.password.is_some() || cfg.has_password == Some(true) {
                    self.load_existing_secret(session, existing, FieldId::Password);
                }
            }
            WidgetConfig::TorrentClient(cfg) => {
                self.set_text(session, FieldId::ClientKind, cfg.client.id());
                self.set_text(session, FieldId::Host, &cfg.host);
                self.set_port(session, cfg.port);
                session.set(self.field_ref(FieldId::Ssl), FieldValue::Flag(cfg.ssl));
                self.set_text(session, FieldId::Username, &cfg.username);
                if cfg.password.is_some() || cfg.has_password == Some(true) {
                    self.load_existing_secret(session, existing, FieldId::Password);
                }
            }
            WidgetConfig::Notes(cfg) => {
                session.set(
                    self.field_ref(FieldId::FontSize),
                    FieldValue::Number(cfg.font_size as f64),
                );
            }
        }
    }

    fn set_text(&self, session: &mut FormSession, id: FieldId, value: &str) {
        session.set(self.field_ref(id), FieldValue::Text(value.to_string()));
    }

    fn set_port(&self, session: &mut FormSession, port: Option<u16>) {
        if let Some(port) = port {
            session.set(self.field_ref(FieldId::Port), FieldValue::Number(port as f64));
        }
    }

    fn load_existing_secret(
        &self,
        session: &mut FormSession,
        existing: &mut ExistingSecrets,
        id: FieldId,
    ) {
        let field_ref = self.field_ref(id);
        session.set(field_ref, FieldValue::Secret(SecretState::KeepExisting));
        existing.mark(field_ref);
    }

    fn text(&self, session: &FormSession, id: FieldId) -> String {
        session
            .get(self.field_ref(id))
            .and_then(|v| v.as_text())
            .unwrap_or_default()
            .to_string()
    }

    fn opt_text(&self, session: &FormSession, id: FieldId) -> Option<String> {
        session
            .get(self.field_ref(id))
            .and_then(|v| v.as_text())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn flag(&self, session: &FormSession, id: FieldId) -> bool {
        session
            .get(self.field_ref(id))
            .and_then(|v| v.as_flag())
            .unwrap_or(false)
    }

    fn port(&self, session: &FormSession) -> Option<u16> {
        let number = session
            .get(self.field_ref(FieldId::Port))
            .and_then(|v| v.as_number())?;
        if (1.0..=65535.0).contains(&number) {
            Some(number as u16)
        } else {
            warn!("Port {number} out of range; omitting");
            None
        }
    }

    fn secret_state(&self, session: &FormSession, id: FieldId) -> SecretState {
        session
            .get(self.field_ref(id))
            .and_then(|v| v.as_secret())
            .cloned()
            .unwrap_or_default()
    }

    fn build_secret(
        &self,
        session: &FormSession,
        existing: &ExistingSecrets,
        cipher: &dyn SecretCipher,
        id: FieldId,
        kind: SecretKind,
    ) -> SecretOutput {
        let state = self.secret_state(session, id);
        serialize_secret(&state, kind, existing.had(self.field_ref(id)), cipher)
    }

    /// Build the typed widget config from this slot's session fields.
    ///
    /// Infallible: unparseable values fall back to defaults with a warning.
    /// Callers are expected to have run [`SlotPanel::validate`] first.
    pub fn build_config(
        &self,
        session: &FormSession,
        existing: &ExistingSecrets,
        cipher: &dyn SecretCipher,
    ) -> WidgetConfig {
        match self.schema.widget_type {
            WidgetType::Weather => WidgetConfig::Weather(WeatherConfig {
                temperature_unit: TemperatureUnit::from_id(&self.text(session, FieldId::TemperatureUnit))
                    .unwrap_or_default(),
                location: session
                    .get(self.field_ref(FieldId::Location))
                    .and_then(|v| v.as_location())
                    .cloned(),
            }),
            WidgetType::Datetime => WidgetConfig::Datetime(DatetimeConfig {
                timezone: self.text(session, FieldId::Timezone),
                time_format: TimeFormat::from_id(&self.text(session, FieldId::TimeFormat))
                    .unwrap_or_default(),
            }),
            WidgetType::SystemMonitor => {
                let defaults = [GaugeKind::Cpu, GaugeKind::Temp, GaugeKind::Ram];
                let fields = [FieldId::Gauge1, FieldId::Gauge2, FieldId::Gauge3];
                let gauges = fields
                    .iter()
                    .zip(defaults)
                    .map(|(field, fallback)| {
                        GaugeKind::from_id(&self.text(session, *field)).unwrap_or(fallback)
                    })
                    .collect();
                WidgetConfig::SystemMonitor(SystemMonitorConfig {
                    gauges,
                    network_interface: self.opt_text(session, FieldId::NetworkInterface),
                })
            }
            WidgetType::DiskMonitor => WidgetConfig::DiskMonitor(DiskMonitorConfig {
                selected_disks: session
                    .get(self.field_ref(FieldId::SelectedDisks))
                    .and_then(|v| v.as_disks())
                    .map(<[_]>::to_vec)
                    .unwrap_or_default(),
            }),
            WidgetType::Pihole => {
                let token = self.build_secret(
                    session,
                    existing,
                    cipher,
                    FieldId::ApiToken,
                    SecretKind::PiholeApiToken,
                );
                let password = self.build_secret(
                    session,
                    existing,
                    cipher,
                    FieldId::Password,
                    SecretKind::PiholePassword,
                );
                WidgetConfig::Pihole(PiholeConfig {
                    host: self.text(session, FieldId::Host),
                    port: self.port(session),
                    ssl: self.flag(session, FieldId::Ssl),
                    api_token: token.value,
                    password: password.value,
                    has_api_token: token.keep_existing.then_some(true),
                    has_password: password.keep_existing.then_some(true),
                })
            }
            WidgetType::Adguard => {
                let username = self.build_secret(
                    session,
                    existing,
                    cipher,
                    FieldId::Username,
                    SecretKind::AdguardUsername,
                );
                let password = self.build_secret(
                    session,
                    existing,
                    cipher,
                    FieldId::Password,
                    SecretKind::AdguardPassword,
                );
                WidgetConfig::Adguard(AdguardConfig {
                    host: self.text(session, FieldId::Host),
                    port: self.port(session),
                    ssl: self.flag(session, FieldId::Ssl),
                    username: username.value,
                    password: password.value,
                    has_username: username.keep_existing.then_some(true),
                    has_password: password.keep_existing.then_some(true),
                })
            }
            WidgetType::TorrentClient => {
                let password = self.build_secret(
                    session,
                    existing,
                    cipher,
                    FieldId::Password,
                    SecretKind::TorrentPassword,
                );
                WidgetConfig::TorrentClient(TorrentClientConfig {
                    client: ClientKind::from_id(&self.text(session, FieldId::ClientKind))
                        .unwrap_or_default(),
                    host: self.text(session, FieldId::Host),
                    port: self.port(session),
                    ssl: self.flag(session, FieldId::Ssl),
                    username: self.text(session, FieldId::Username),
                    password: password.value,
                    has_password: password.keep_existing.then_some(true),
                })
            }
            WidgetType::Notes => {
                let font_size = session
                    .get(self.field_ref(FieldId::FontSize))
                    .and_then(|v| v.as_number())
                    .filter(|n| *n >= 1.0)
                    .map(|n| n.round() as u32)
                    .unwrap_or_else(|| NotesConfig::default().font_size);
                WidgetConfig::Notes(NotesConfig { font_size })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{
        datetime_schema, disk_monitor_schema, pihole_schema, weather_schema,
    };
    use anyhow::Result;
    use homedeck_types::DiskSelection;

    struct StubCipher;

    impl SecretCipher for StubCipher {
        fn encrypt(&self, _kind: SecretKind, plaintext: &str) -> Result<String> {
            Ok(format!("enc:{plaintext}"))
        }
    }

    #[test]
    fn test_apply_defaults_is_idempotent() {
        let schema = datetime_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        let timezone = FieldRef::new(SlotId::Top, FieldId::Timezone);

        panel.apply_defaults(&mut session);
        session.set(timezone, FieldValue::Text("Europe/London".to_string()));
        panel.apply_defaults(&mut session);

        assert_eq!(
            session.get(timezone).and_then(|v| v.as_text()),
            Some("Europe/London")
        );
    }

    #[test]
    fn test_defaults_do_not_overwrite_empty_text() {
        let schema = datetime_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        let timezone = FieldRef::new(SlotId::Top, FieldId::Timezone);

        // "" is the deliberate "follow client timezone" choice.
        session.set(timezone, FieldValue::Text(String::new()));
        panel.apply_defaults(&mut session);
        assert!(session.get(timezone).unwrap().is_empty_text());
    }

    #[test]
    fn test_missing_host_fails_validation() {
        let schema = pihole_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        panel.apply_defaults(&mut session);

        let failed = panel.validate(&mut session);
        let host = FieldRef::new(SlotId::Top, FieldId::Host);
        assert_eq!(failed, vec![host]);
        assert_eq!(session.error(host), Some(FieldErrorKind::Required));
    }

    #[test]
    fn test_empty_disk_list_fails_validation() {
        let schema = disk_monitor_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        panel.apply_defaults(&mut session);

        let failed = panel.validate(&mut session);
        let disks = FieldRef::new(SlotId::Top, FieldId::SelectedDisks);
        assert_eq!(failed, vec![disks]);
        assert_eq!(session.error(disks), Some(FieldErrorKind::NoDisksSelected));
    }

    #[test]
    fn test_duplicate_mounts_fail_validation() {
        let schema = disk_monitor_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        let disks = FieldRef::new(SlotId::Top, FieldId::SelectedDisks);
        let selection = |mount: &str| DiskSelection {
            mount: mount.to_string(),
            custom_name: String::new(),
            show_mount_path: false,
        };
        session.set(
            disks,
            FieldValue::Disks(vec![selection("/"), selection("/")]),
        );

        let failed = panel.validate(&mut session);
        assert_eq!(failed, vec![disks]);
        assert_eq!(session.error(disks), Some(FieldErrorKind::DuplicateMount));
    }

    #[test]
    fn test_cleared_secret_waives_conditional_requirement() {
        let schema = crate::core::schema::adguard_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        session.set(
            FieldRef::new(SlotId::Top, FieldId::Host),
            FieldValue::Text("192.168.1.2".to_string()),
        );
        session.set(
            FieldRef::new(SlotId::Top, FieldId::Password),
            FieldValue::Secret(SecretState::Replace("hunter2".to_string())),
        );
        session.set(
            FieldRef::new(SlotId::Top, FieldId::Username),
            FieldValue::Secret(SecretState::Cleared),
        );

        assert!(panel.validate(&mut session).is_empty());
    }

    #[test]
    fn test_weather_round_trip() {
        let schema = weather_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        let mut existing = ExistingSecrets::default();
        let config = WidgetConfig::Weather(WeatherConfig {
            temperature_unit: TemperatureUnit::Fahrenheit,
            location: Some(homedeck_types::LocationRef {
                name: "Paris".to_string(),
                latitude: 48.85,
                longitude: 2.35,
            }),
        });

        panel.load_config(&mut session, &mut existing, &config);
        let rebuilt = panel.build_config(&session, &existing, &StubCipher);
        assert_eq!(rebuilt, config);
    }

    #[test]
    fn test_pihole_load_prefers_token_over_password() {
        let schema = pihole_schema();
        let panel = SlotPanel::new(&schema, SlotId::Top);
        let mut session = FormSession::new();
        let mut existing = ExistingSecrets::default();
        let config = WidgetConfig::Pihole(PiholeConfig {
            host: "pi.hole".to_string(),
            api_token: Some("ciphertext-a".to_string()),
            password: Some("ciphertext-b".to_string()),
            ..Default::default()
        });

        panel.load_config(&mut session, &mut existing, &config);

        let token = FieldRef::new(SlotId::Top, FieldId::ApiToken);
        let password = FieldRef::new(SlotId::Top, FieldId::Password);
        assert_eq!(
            session.get(token).and_then(|v| v.as_secret()).cloned(),
            Some(SecretState::KeepExisting)
        );
        assert!(session.get(password).is_none());
        assert!(existing.had(token));
        assert!(!existing.had(password));
    }
}

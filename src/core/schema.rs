//! Widget schema table: which fields each widget type carries, their kinds,
//! defaults, and validation requirements.

use homedeck_types::{
    ClientKind, FieldId, FieldKind, FieldValue, GaugeKind, TemperatureUnit, TimeFormat, WidgetType,
};

/// When a field must hold a value for the form to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Never,
    Always,
    /// Required only while the named peer field is present.
    IfPeerPresent(FieldId),
}

/// Static description of one form field within a widget schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: FieldId,
    pub kind: FieldKind,
    /// Sensitive fields hold a [`homedeck_types::SecretState`] and go through
    /// the masking layer.
    pub sensitive: bool,
    pub required: Requirement,
    /// At most one of this field and its peer may carry a value.
    pub exclusive_with: Option<FieldId>,
}

impl FieldSpec {
    pub fn new(id: FieldId, kind: FieldKind) -> Self {
        Self {
            id,
            kind,
            sensitive: false,
            required: Requirement::Never,
            exclusive_with: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = Requirement::Always;
        self
    }

    pub fn required_with(mut self, peer: FieldId) -> Self {
        self.required = Requirement::IfPeerPresent(peer);
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn exclusive_with(mut self, peer: FieldId) -> Self {
        self.exclusive_with = Some(peer);
        self
    }
}

/// The full field table for one widget type.
#[derive(Debug, Clone)]
pub struct WidgetSchema {
    pub widget_type: WidgetType,
    pub fields: Vec<FieldSpec>,
    /// Initial values, applied only to fields that are currently absent.
    pub defaults: Vec<(FieldId, FieldValue)>,
}

impl WidgetSchema {
    pub fn field(&self, id: FieldId) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.id == id)
    }

    pub fn has_field(&self, id: FieldId) -> bool {
        self.field(id).is_some()
    }

    /// The sensitive fields of this schema, in declaration order.
    pub fn secret_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.sensitive)
    }
}

pub fn weather_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::Weather,
        fields: vec![
            FieldSpec::new(FieldId::TemperatureUnit, FieldKind::Text),
            FieldSpec::new(FieldId::Location, FieldKind::Location),
        ],
        defaults: vec![(
            FieldId::TemperatureUnit,
            FieldValue::Text(TemperatureUnit::Celsius.id().to_string()),
        )],
    }
}

pub fn datetime_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::Datetime,
        fields: vec![
            FieldSpec::new(FieldId::Timezone, FieldKind::Text),
            FieldSpec::new(FieldId::TimeFormat, FieldKind::Text),
        ],
        defaults: vec![
            // Empty string means "follow the viewing client's timezone".
            (FieldId::Timezone, FieldValue::Text(String::new())),
            (
                FieldId::TimeFormat,
                FieldValue::Text(TimeFormat::Hour24.id().to_string()),
            ),
        ],
    }
}

pub fn system_monitor_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::SystemMonitor,
        fields: vec![
            FieldSpec::new(FieldId::Gauge1, FieldKind::Text),
            FieldSpec::new(FieldId::Gauge2, FieldKind::Text),
            FieldSpec::new(FieldId::Gauge3, FieldKind::Text),
            FieldSpec::new(FieldId::NetworkInterface, FieldKind::Text),
        ],
        defaults: vec![
            (
                FieldId::Gauge1,
                FieldValue::Text(GaugeKind::Cpu.id().to_string()),
            ),
            (
                FieldId::Gauge2,
                FieldValue::Text(GaugeKind::Temp.id().to_string()),
            ),
            (
                FieldId::Gauge3,
                FieldValue::Text(GaugeKind::Ram.id().to_string()),
            ),
        ],
    }
}

pub fn disk_monitor_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::DiskMonitor,
        fields: vec![FieldSpec::new(FieldId::SelectedDisks, FieldKind::Disks).required()],
        defaults: vec![(FieldId::SelectedDisks, FieldValue::Disks(Vec::new()))],
    }
}

pub fn pihole_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::Pihole,
        fields: vec![
            FieldSpec::new(FieldId::Host, FieldKind::Text).required(),
            FieldSpec::new(FieldId::Port, FieldKind::Number),
            FieldSpec::new(FieldId::Ssl, FieldKind::Flag),
            FieldSpec::new(FieldId::ApiToken, FieldKind::Secret)
                .sensitive()
                .exclusive_with(FieldId::Password),
            FieldSpec::new(FieldId::Password, FieldKind::Secret)
                .sensitive()
                .exclusive_with(FieldId::ApiToken),
        ],
        defaults: vec![(FieldId::Ssl, FieldValue::Flag(false))],
    }
}

pub fn adguard_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::Adguard,
        fields: vec![
            FieldSpec::new(FieldId::Host, FieldKind::Text).required(),
            FieldSpec::new(FieldId::Port, FieldKind::Number),
            FieldSpec::new(FieldId::Ssl, FieldKind::Flag),
            // AdGuard rejects a password without a username, so the username
            // becomes mandatory as soon as a password is entered.
            FieldSpec::new(FieldId::Username, FieldKind::Secret)
                .sensitive()
                .required_with(FieldId::Password),
            FieldSpec::new(FieldId::Password, FieldKind::Secret).sensitive(),
        ],
        defaults: vec![(FieldId::Ssl, FieldValue::Flag(false))],
    }
}

pub fn torrent_client_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::TorrentClient,
        fields: vec![
            FieldSpec::new(FieldId::ClientKind, FieldKind::Text),
            FieldSpec::new(FieldId::Host, FieldKind::Text).required(),
            FieldSpec::new(FieldId::Port, FieldKind::Number),
            FieldSpec::new(FieldId::Ssl, FieldKind::Flag),
            FieldSpec::new(FieldId::Username, FieldKind::Text),
            FieldSpec::new(FieldId::Password, FieldKind::Secret).sensitive(),
        ],
        defaults: vec![
            (
                FieldId::ClientKind,
                FieldValue::Text(ClientKind::Qbittorrent.id().to_string()),
            ),
            (FieldId::Ssl, FieldValue::Flag(false)),
        ],
    }
}

pub fn notes_schema() -> WidgetSchema {
    WidgetSchema {
        widget_type: WidgetType::Notes,
        fields: vec![FieldSpec::new(FieldId::FontSize, FieldKind::Number)],
        defaults: vec![(FieldId::FontSize, FieldValue::Number(14.0))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pihole_secrets_are_mutually_exclusive() {
        let schema = pihole_schema();
        let token = schema.field(FieldId::ApiToken).unwrap();
        let password = schema.field(FieldId::Password).unwrap();
        assert_eq!(token.exclusive_with, Some(FieldId::Password));
        assert_eq!(password.exclusive_with, Some(FieldId::ApiToken));
        assert!(token.sensitive && password.sensitive);
    }

    #[test]
    fn test_adguard_username_requires_password_peer() {
        let schema = adguard_schema();
        let username = schema.field(FieldId::Username).unwrap();
        assert_eq!(
            username.required,
            Requirement::IfPeerPresent(FieldId::Password)
        );
    }

    #[test]
    fn test_system_monitor_gauge_defaults() {
        let schema = system_monitor_schema();
        let gauge = |id| {
            schema
                .defaults
                .iter()
                .find(|(field, _)| *field == id)
                .and_then(|(_, value)| value.as_text())
                .unwrap()
                .to_string()
        };
        assert_eq!(gauge(FieldId::Gauge1), "cpu");
        assert_eq!(gauge(FieldId::Gauge2), "temp");
        assert_eq!(gauge(FieldId::Gauge3), "ram");
    }

    #[test]
    fn test_every_default_targets_a_schema_field() {
        for widget_type in WidgetType::all() {
            let schema = crate::core::SchemaRegistry::with_builtins()
                .schema_for(widget_type)
                .unwrap()
                .clone();
            for (id, _) in &schema.defaults {
                assert!(schema.has_field(*id), "{widget_type:?} defaults {id:?}");
            }
        }
    }
}

//! The live field registry behind one open configuration form.

use std::collections::HashMap;

use homedeck_types::{FieldId, FieldRef, FieldValue, SlotId};

use super::error::FieldErrorKind;

/// Owned state of an open form: every field value the user has produced so
/// far, plus per-field validation errors.
///
/// A session is created when the form opens and dropped on submit or cancel.
/// Callers mutate it through `&mut self`; there is no interior mutability and
/// no sharing across threads.
#[derive(Debug, Default)]
pub struct FormSession {
    values: HashMap<FieldRef, FieldValue>,
    errors: HashMap<FieldRef, FieldErrorKind>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldRef) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn set(&mut self, field: FieldRef, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Remove a field value entirely; the field reads as absent afterwards.
    pub fn remove(&mut self, field: FieldRef) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn contains(&self, field: FieldRef) -> bool {
        self.values.contains_key(&field)
    }

    /// All values belonging to one slot, keyed by bare field id.
    ///
    /// Used to capture a slot snapshot; empty strings are values too and are
    /// included.
    pub fn slot_values(&self, slot: SlotId) -> HashMap<FieldId, FieldValue> {
        self.values
            .iter()
            .filter(|(field, _)| field.slot == slot)
            .map(|(field, value)| (field.field, value.clone()))
            .collect()
    }

    /// Drop every value and error belonging to one slot.
    pub fn clear_slot(&mut self, slot: SlotId) {
        self.values.retain(|field, _| field.slot != slot);
        self.errors.retain(|field, _| field.slot != slot);
    }

    pub fn error(&self, field: FieldRef) -> Option<FieldErrorKind> {
        self.errors.get(&field).copied()
    }

    pub fn set_error(&mut self, field: FieldRef, kind: FieldErrorKind) {
        self.errors.insert(field, kind);
    }

    pub fn clear_error(&mut self, field: FieldRef) {
        self.errors.remove(&field);
    }

    pub fn errors_for_slot(&self, slot: SlotId) -> Vec<FieldRef> {
        let mut failed: Vec<FieldRef> = self
            .errors
            .keys()
            .filter(|field| field.slot == slot)
            .copied()
            .collect();
        failed.sort_by_key(|field| field.field as u32);
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_isolation() {
        let mut session = FormSession::new();
        let top = FieldRef::new(SlotId::Top, FieldId::Timezone);
        let bottom = FieldRef::new(SlotId::Bottom, FieldId::Timezone);
        session.set(top, FieldValue::Text("Europe/London".to_string()));
        session.set(bottom, FieldValue::Text("America/New_York".to_string()));

        assert_eq!(
            session.get(top).and_then(|v| v.as_text()),
            Some("Europe/London")
        );
        assert_eq!(
            session.get(bottom).and_then(|v| v.as_text()),
            Some("America/New_York")
        );

        session.clear_slot(SlotId::Top);
        assert!(session.get(top).is_none());
        assert!(session.get(bottom).is_some());
    }

    #[test]
    fn test_slot_values_include_empty_text() {
        let mut session = FormSession::new();
        let field = FieldRef::new(SlotId::Top, FieldId::Timezone);
        session.set(field, FieldValue::Text(String::new()));
        let snapshot = session.slot_values(SlotId::Top);
        assert_eq!(
            snapshot.get(&FieldId::Timezone),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn test_errors_tracked_per_field() {
        let mut session = FormSession::new();
        let field = FieldRef::new(SlotId::Top, FieldId::Host);
        session.set_error(field, FieldErrorKind::Required);
        assert_eq!(session.error(field), Some(FieldErrorKind::Required));
        session.clear_error(field);
        assert_eq!(session.error(field), None);
    }
}

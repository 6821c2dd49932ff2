//! Masking layer for sensitive form fields.
//!
//! Raw text input from a secret entry is folded into a
//! [`SecretState`](homedeck_types::SecretState) here, so the rest of the form
//! engine never compares display strings against the mask token.

use std::collections::HashSet;

use anyhow::Result;
use log::warn;

use homedeck_types::{FieldId, FieldRef, FieldValue, SecretKind, SecretState, SlotId, MASK_TOKEN};

use crate::core::WidgetSchema;

use super::session::FormSession;

/// Encrypts plaintext secrets at submit time.
///
/// Implemented by the AES-GCM cipher in `services::crypto`; tests substitute
/// their own.
pub trait SecretCipher {
    fn encrypt(&self, kind: SecretKind, plaintext: &str) -> Result<String>;
}

/// Which sensitive fields had a stored secret when the form was loaded.
///
/// Captured once from the persisted `_hasX` flags and never updated while the
/// form is open; "did a secret exist before editing" is a property of the
/// loaded config, not of the live field state.
#[derive(Debug, Clone, Default)]
pub struct ExistingSecrets {
    flags: HashSet<FieldRef>,
}

impl ExistingSecrets {
    pub fn mark(&mut self, field: FieldRef) {
        self.flags.insert(field);
    }

    pub fn had(&self, field: FieldRef) -> bool {
        self.flags.contains(&field)
    }
}

/// Fold one raw input event from a secret entry into the session.
///
/// The mask token is the placeholder for an untouched stored secret, so
/// receiving it verbatim is a no-op. An emptied field becomes `Cleared` when
/// a stored secret existed (an explicit removal) and `Unset` otherwise. Any
/// other text is a new plaintext secret; entering one displaces the mutually
/// exclusive sibling secret, if the schema declares one.
pub fn apply_secret_input(
    session: &mut FormSession,
    schema: &WidgetSchema,
    existing: &ExistingSecrets,
    slot: SlotId,
    field: FieldId,
    input: &str,
) {
    let field_ref = FieldRef::new(slot, field);

    if input == MASK_TOKEN {
        return;
    }

    if input.is_empty() {
        let next = if existing.had(field_ref) {
            SecretState::Cleared
        } else {
            SecretState::Unset
        };
        session.set(field_ref, FieldValue::Secret(next));
        session.clear_error(field_ref);
        return;
    }

    session.set(
        field_ref,
        FieldValue::Secret(SecretState::Replace(input.to_string())),
    );
    session.clear_error(field_ref);

    let peer = schema.field(field).and_then(|spec| spec.exclusive_with);
    if let Some(peer) = peer {
        let peer_ref = FieldRef::new(slot, peer);
        let displaced = match session.get(peer_ref).and_then(|v| v.as_secret()) {
            Some(SecretState::KeepExisting) => SecretState::Cleared,
            Some(SecretState::Cleared) => SecretState::Cleared,
            _ => SecretState::Unset,
        };
        session.set(peer_ref, FieldValue::Secret(displaced));
        session.clear_error(peer_ref);
    }
}

/// Persisted form of one secret field: at most one of `value` (ciphertext)
/// and `keep_existing` (carry the stored secret forward) is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecretOutput {
    pub value: Option<String>,
    pub keep_existing: bool,
}

/// Serialize one secret state for persistence.
///
/// `Replace` is encrypted through the cipher; if encryption fails the error
/// is logged and the output degrades to "no new secret provided", which
/// keeps a previously stored secret alive rather than aborting the submit.
/// `KeepExisting` emits only the marker flag. `Cleared` and `Unset` emit
/// nothing, which deletes any stored secret.
pub fn serialize_secret(
    state: &SecretState,
    kind: SecretKind,
    had_existing: bool,
    cipher: &dyn SecretCipher,
) -> SecretOutput {
    match state {
        SecretState::Replace(plaintext) => match cipher.encrypt(kind, plaintext) {
            Ok(ciphertext) => SecretOutput {
                value: Some(ciphertext),
                keep_existing: false,
            },
            Err(err) => {
                warn!(
                    "Failed to encrypt {}: {err:#}; treating as no new secret",
                    kind.id()
                );
                SecretOutput {
                    value: None,
                    keep_existing: had_existing,
                }
            }
        },
        SecretState::KeepExisting => SecretOutput {
            value: None,
            keep_existing: true,
        },
        SecretState::Unset | SecretState::Cleared => SecretOutput::default(),
    }
}

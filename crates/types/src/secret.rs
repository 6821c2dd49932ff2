//! Secret field lifecycle types.

use serde::{Deserialize, Serialize};

/// Placeholder shown in place of a previously saved secret.
pub const MASK_TOKEN: &str = "**********";

/// Lifecycle of one sensitive form field.
///
/// `KeepExisting` must never reach the persistence layer as plaintext; it
/// serializes to a `_hasX` marker flag instead. `Cleared` records an explicit
/// removal, which serializes as neither value nor flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecretState {
    /// No secret entered and none saved.
    #[default]
    Unset,
    /// A saved secret exists and the user has not touched the field.
    KeepExisting,
    /// The user typed a new secret; held as plaintext until submit-time
    /// encryption.
    Replace(String),
    /// A saved secret existed and the user erased the field.
    Cleared,
}

impl SecretState {
    /// What the input widget should show for this state.
    pub fn display_value(&self) -> &str {
        match self {
            SecretState::KeepExisting => MASK_TOKEN,
            SecretState::Replace(value) => value,
            SecretState::Unset | SecretState::Cleared => "",
        }
    }

    /// True when the field currently carries a usable secret, saved or new.
    pub fn is_present(&self) -> bool {
        matches!(self, SecretState::KeepExisting | SecretState::Replace(_))
    }

    /// The newly entered plaintext, if any.
    pub fn new_value(&self) -> Option<&str> {
        match self {
            SecretState::Replace(value) => Some(value),
            _ => None,
        }
    }
}

/// Which credential a sensitive field carries. Used for log context and to
/// pick the matching encryption helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    PiholeApiToken,
    PiholePassword,
    AdguardUsername,
    AdguardPassword,
    TorrentPassword,
}

impl SecretKind {
    pub fn id(self) -> &'static str {
        match self {
            SecretKind::PiholeApiToken => "pihole_api_token",
            SecretKind::PiholePassword => "pihole_password",
            SecretKind::AdguardUsername => "adguard_username",
            SecretKind::AdguardPassword => "adguard_password",
            SecretKind::TorrentPassword => "torrent_password",
        }
    }
}

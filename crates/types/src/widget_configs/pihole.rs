//! Pi-hole widget configuration types.

use serde::{Deserialize, Serialize};

/// Pi-hole widget configuration.
///
/// `api_token` and `password` are mutually exclusive credentials and hold
/// ciphertext when set. The `_hasApiToken` / `_hasPassword` flags mark a
/// stored credential that was carried forward unchanged, so the plaintext
/// never travels back through the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PiholeConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default)]
    pub ssl: bool,
    /// Encrypted API token (v5 style auth).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Encrypted web password (v6 style auth).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        rename = "_hasApiToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_api_token: Option<bool>,
    #[serde(
        default,
        rename = "_hasPassword",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_password: Option<bool>,
}

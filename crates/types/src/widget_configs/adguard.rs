//! AdGuard Home widget configuration types.

use serde::{Deserialize, Serialize};

/// AdGuard Home widget configuration.
///
/// Both the username and the password are treated as credentials: stored
/// encrypted, carried forward via `_hasUsername` / `_hasPassword` flags when
/// left untouched in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdguardConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        rename = "_hasUsername",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_username: Option<bool>,
    #[serde(
        default,
        rename = "_hasPassword",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_password: Option<bool>,
}

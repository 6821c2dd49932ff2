//! Torrent client widget configuration types.

use serde::{Deserialize, Serialize};

/// Supported torrent client backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    #[default]
    Qbittorrent,
    Transmission,
    Deluge,
}

impl ClientKind {
    pub fn id(self) -> &'static str {
        match self {
            ClientKind::Qbittorrent => "qbittorrent",
            ClientKind::Transmission => "transmission",
            ClientKind::Deluge => "deluge",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "qbittorrent" => Some(ClientKind::Qbittorrent),
            "transmission" => Some(ClientKind::Transmission),
            "deluge" => Some(ClientKind::Deluge),
            _ => None,
        }
    }

    /// Default web UI port for each backend.
    pub fn default_port(self) -> u16 {
        match self {
            ClientKind::Qbittorrent => 8080,
            ClientKind::Transmission => 9091,
            ClientKind::Deluge => 8112,
        }
    }
}

/// Torrent client widget configuration.
///
/// The username is plain text; only the password is a credential and follows
/// the encrypted-value / `_hasPassword` flag convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TorrentClientConfig {
    #[serde(default)]
    pub client: ClientKind,
    #[serde(default)]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        rename = "_hasPassword",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_password: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_kind_ids() {
        for kind in [
            ClientKind::Qbittorrent,
            ClientKind::Transmission,
            ClientKind::Deluge,
        ] {
            assert_eq!(ClientKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ClientKind::from_id("rtorrent"), None);
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(ClientKind::Qbittorrent.default_port(), 8080);
        assert_eq!(ClientKind::Transmission.default_port(), 9091);
        assert_eq!(ClientKind::Deluge.default_port(), 8112);
    }

    #[test]
    fn test_username_is_plain() {
        let config = TorrentClientConfig {
            username: "admin".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["username"], "admin");
        assert!(json.get("_hasPassword").is_none());
    }
}

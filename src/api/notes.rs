//! Notes REST client for the dashboard backend.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One note as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// Create/update payload; the backend fills id and timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

pub struct NotesClient {
    client: reqwest::Client,
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/notes{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn get_notes(&self) -> Result<Vec<Note>> {
        let notes = self
            .client
            .get(self.url(""))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(notes)
    }

    pub async fn create_note(&self, payload: &NotePayload) -> Result<Note> {
        let note = self
            .client
            .post(self.url(""))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(note)
    }

    pub async fn update_note(&self, id: Uuid, payload: &NotePayload) -> Result<Note> {
        let note = self
            .client
            .put(self.url(&format!("/{id}")))
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(note)
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<()> {
        self.client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_deserializes_camel_case() {
        let body = r#"{
            "id": "7b7aa7a4-3b6d-4d11-9e38-0e3ad089ba40",
            "title": "Groceries",
            "content": "milk",
            "createdAt": "2025-06-01T10:00:00Z",
            "updatedAt": "2025-06-02T11:30:00Z",
            "fontSize": 16
        }"#;
        let note: Note = serde_json::from_str(body).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.font_size, Some(16));
        assert!(note.updated_at > note.created_at);
    }

    #[test]
    fn test_payload_omits_absent_font_size() {
        let payload = NotePayload {
            title: "t".to_string(),
            content: "c".to_string(),
            font_size: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("fontSize").is_none());
    }

    #[test]
    fn test_url_building() {
        let client = NotesClient::new("http://dash:3000/");
        assert_eq!(client.url(""), "http://dash:3000/api/notes");
        assert_eq!(client.url("/abc"), "http://dash:3000/api/notes/abc");
    }
}

//! Download queue actions against the dashboard backend.
//!
//! All actions return `true` on success and `false` on any failure, which is
//! logged here. Callers leave their view unchanged on `false`; the next poll
//! shows the real state.

use log::warn;

pub struct QueueClient {
    client: reqwest::Client,
    base_url: String,
}

impl QueueClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn check(&self, action: &str, request: reqwest::RequestBuilder) -> bool {
        let result = async { request.send().await?.error_for_status() }.await;
        match result {
            Ok(_) => true,
            Err(err) => {
                warn!("{action} failed: {err:#}");
                false
            }
        }
    }

    /// Resume a paused torrent.
    pub async fn resume(&self, hash: &str) -> bool {
        let request = self.client.post(self.url(&format!("/api/torrents/{hash}/resume")));
        self.check("Torrent resume", request).await
    }

    /// Pause a running torrent.
    pub async fn pause(&self, hash: &str) -> bool {
        let request = self.client.post(self.url(&format!("/api/torrents/{hash}/pause")));
        self.check("Torrent pause", request).await
    }

    /// Remove a torrent, optionally deleting its downloaded files.
    pub async fn delete(&self, hash: &str, delete_files: bool) -> bool {
        let request = self
            .client
            .delete(self.url(&format!("/api/torrents/{hash}")))
            .query(&[("deleteFiles", delete_files)]);
        self.check("Torrent delete", request).await
    }

    /// Remove an item from the media queue.
    pub async fn remove_queue_item(
        &self,
        id: u64,
        remove_from_client: bool,
        blocklist: bool,
    ) -> bool {
        let request = self
            .client
            .delete(self.url(&format!("/api/queue/{id}")))
            .query(&[
                ("removeFromClient", remove_from_client),
                ("blocklist", blocklist),
            ]);
        self.check("Queue item removal", request).await
    }
}

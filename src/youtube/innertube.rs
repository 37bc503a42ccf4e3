// InnerTube client
// Talks to the internal YouTube Music API ("youtubei/v1") over HTTPS with reqwest.
// Only the two calls the queues need: "next" (radio pages) and "browse" (album pages).

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::queue::PlayableItem;

use super::client::{AlbumPage, ContinuationToken, NextPage, RemoteMusicClient, WatchEndpoint};
use super::parser;

pub struct InnerTubeClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    context: Value,
    // Last album page fetched, keyed by browse id. Album mode resolves the
    // radio playlist first and then the queue asks for the same tracks.
    last_album: Mutex<Option<(String, AlbumPage)>>,
}

impl InnerTubeClient {
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(InnerTubeClient {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            context: json!({
                "client": {
                    "clientName": config.client_name,
                    "clientVersion": config.client_version,
                    "hl": config.hl,
                    "gl": config.gl,
                }
            }),
            last_album: Mutex::new(None),
        })
    }

    /// Album metadata, audio playlist id and tracks
    pub async fn album(&self, album_id: &str) -> ClientResult<AlbumPage> {
        if let Some(page) = self.cached_album(album_id) {
            tracing::debug!(album_id, "album page served from cache");
            return Ok(page);
        }

        let body = json!({
            "context": self.context,
            "browseId": album_id,
        });
        let response = self.post("browse", &body).await?;
        let page = parser::parse_album_response(&response)?;
        tracing::debug!(album_id, tracks = page.tracks.len(), "fetched album page");
        if let Ok(mut last) = self.last_album.lock() {
            *last = Some((album_id.to_string(), page.clone()));
        }
        Ok(page)
    }

    fn cached_album(&self, album_id: &str) -> Option<AlbumPage> {
        let last = self.last_album.lock().ok()?;
        match last.as_ref() {
            Some((id, page)) if id == album_id => Some(page.clone()),
            _ => None,
        }
    }

    fn next_body(&self, endpoint: &WatchEndpoint, continuation: Option<&ContinuationToken>) -> Value {
        let mut body = json!({
            "context": self.context,
            "isAudioOnly": true,
            "enablePersistentPlaylistPanel": true,
            "tunerSettingValue": "AUTOMIX_SETTING_NORMAL",
        });
        let fields = [
            ("videoId", endpoint.video_id.as_deref()),
            ("playlistId", endpoint.playlist_id.as_deref()),
            ("params", endpoint.params.as_deref()),
            ("playlistSetVideoId", endpoint.playlist_set_video_id.as_deref()),
            ("continuation", continuation.map(ContinuationToken::as_str)),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body[key] = json!(value);
            }
        }
        if let Some(index) = endpoint.index {
            body["index"] = json!(index);
        }
        body
    }

    // POST a JSON body to <api_base>/<path> and return the decoded JSON
    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value> {
        let url = format!("{}/{}", self.api_base, path);
        let mut request = self
            .http
            .post(&url)
            .query(&[("prettyPrint", "false")])
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "InnerTube request failed");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RemoteMusicClient for InnerTubeClient {
    async fn album_tracks(&self, album_id: &str) -> ClientResult<Vec<PlayableItem>> {
        Ok(self.album(album_id).await?.tracks)
    }

    async fn next_page(
        &self,
        endpoint: &WatchEndpoint,
        continuation: Option<&ContinuationToken>,
    ) -> ClientResult<NextPage> {
        let body = self.next_body(endpoint, continuation);
        let response = self.post("next", &body).await?;
        let page = parser::parse_next_response(&response)?;
        tracing::debug!(
            items = page.items.len(),
            has_continuation = page.continuation.is_some(),
            "fetched next page"
        );
        Ok(page)
    }
}

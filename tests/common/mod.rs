//! Shared fixtures for integration tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use youtube_music_queue::error::ClientResult;
use youtube_music_queue::{
    ClientError, ContinuationToken, NextPage, PlayableItem, RemoteMusicClient, WatchEndpoint,
};

pub fn items(ids: &[&str]) -> Vec<PlayableItem> {
    ids.iter().map(|id| PlayableItem::new(*id, *id)).collect()
}

pub fn page(ids: &[&str], continuation: Option<&str>, current_index: Option<usize>) -> NextPage {
    NextPage {
        title: Some("Album Radio".to_string()),
        items: items(ids),
        current_index,
        continuation: continuation.map(ContinuationToken::new),
    }
}

/// Canned remote: one album track list and pages keyed by continuation token
#[derive(Default)]
pub struct StubRemote {
    pub album: Option<Vec<PlayableItem>>,
    pub pages: HashMap<Option<String>, NextPage>,
    pub endpoints: Mutex<Vec<WatchEndpoint>>,
}

impl StubRemote {
    pub fn with_album(mut self, tracks: Vec<PlayableItem>) -> Self {
        self.album = Some(tracks);
        self
    }

    pub fn with_page(mut self, token: Option<&str>, page: NextPage) -> Self {
        self.pages.insert(token.map(str::to_string), page);
        self
    }
}

#[async_trait]
impl RemoteMusicClient for StubRemote {
    async fn album_tracks(&self, album_id: &str) -> ClientResult<Vec<PlayableItem>> {
        self.album
            .clone()
            .ok_or_else(|| ClientError::NotFound(album_id.to_string()))
    }

    async fn next_page(
        &self,
        endpoint: &WatchEndpoint,
        continuation: Option<&ContinuationToken>,
    ) -> ClientResult<NextPage> {
        self.endpoints.lock().unwrap().push(endpoint.clone());
        let key = continuation.map(|t| t.as_str().to_string());
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| ClientError::from_status(503, "radio unavailable"))
    }
}

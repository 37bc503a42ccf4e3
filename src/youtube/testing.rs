// In-memory RemoteMusicClient for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::queue::PlayableItem;

use super::client::{ContinuationToken, NextPage, RemoteMusicClient, WatchEndpoint};

pub(crate) fn items(ids: &[&str]) -> Vec<PlayableItem> {
    ids.iter().map(|id| PlayableItem::new(*id, id.to_uppercase())).collect()
}

pub(crate) fn page(ids: &[&str], continuation: Option<&str>, current_index: Option<usize>) -> NextPage {
    NextPage {
        title: Some("Radio".to_string()),
        items: items(ids),
        current_index,
        continuation: continuation.map(ContinuationToken::new),
    }
}

// Pages keyed by the token used to request them (None = first page).
// A missing album or page answers with a 500.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    album: Option<Vec<PlayableItem>>,
    pages: HashMap<Option<String>, NextPage>,
    requested: Mutex<Vec<Option<String>>>,
}

impl ScriptedClient {
    pub(crate) fn with_page(mut self, token: Option<&str>, page: NextPage) -> Self {
        self.pages.insert(token.map(str::to_string), page);
        self
    }

    pub(crate) fn with_album(mut self, tracks: Vec<PlayableItem>) -> Self {
        self.album = Some(tracks);
        self
    }

    /// Tokens of every next_page call so far, in order
    pub(crate) fn requested(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteMusicClient for ScriptedClient {
    async fn album_tracks(&self, _album_id: &str) -> ClientResult<Vec<PlayableItem>> {
        self.album
            .clone()
            .ok_or_else(|| ClientError::from_status(500, "album down"))
    }

    async fn next_page(
        &self,
        _endpoint: &WatchEndpoint,
        continuation: Option<&ContinuationToken>,
    ) -> ClientResult<NextPage> {
        let key = continuation.map(|t| t.as_str().to_string());
        self.requested.lock().unwrap().push(key.clone());
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| ClientError::from_status(500, "radio down"))
    }
}

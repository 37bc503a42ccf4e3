// ==========================================
// CONTINUATION RADIO QUEUE
// ==========================================
// A queue backed by the remote radio engine. It drives continuation-token
// pagination against a RemoteMusicClient:
//
//   Unstarted --initial_status()--> HasMore(T0) or Exhausted
//   HasMore(Tn) --next_page()--> HasMore(Tn+1) or Exhausted
//
// There is no way back to Unstarted. A failed fetch leaves the state as it
// was before the call; the caller is expected to drop the queue.
//
// Not thread-safe: initial_status() and next_page() take &mut self, so one
// owner drives the instance at a time.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::QueueError;
use crate::youtube::{ContinuationToken, RemoteMusicClient, WatchEndpoint};

use super::item::PlayableItem;
use super::QueueStatus;

/// What the radio is generated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioSeed {
    /// Radio seeded by a song. `preload` is the song's metadata when the caller
    /// already has it (it was clicked in a list, for example).
    Song {
        endpoint: WatchEndpoint,
        preload: Option<PlayableItem>,
    },
    /// Radio seeded by an album playlist; the album's own tracks come first
    Album {
        album_id: String,
        endpoint: WatchEndpoint,
    },
}

impl RadioSeed {
    pub fn endpoint(&self) -> &WatchEndpoint {
        match self {
            RadioSeed::Song { endpoint, .. } => endpoint,
            RadioSeed::Album { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    Unstarted,
    HasMore(ContinuationToken),
    Exhausted,
}

impl PageState {
    fn after(token: Option<ContinuationToken>) -> Self {
        match token {
            Some(token) => PageState::HasMore(token),
            None => PageState::Exhausted,
        }
    }
}

pub struct ContinuationRadioQueue {
    client: Arc<dyn RemoteMusicClient>,
    seed: RadioSeed,
    state: PageState,
    // Every token already sent to the server
    spent: HashSet<ContinuationToken>,
}

impl fmt::Debug for ContinuationRadioQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuationRadioQueue")
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("spent", &self.spent.len())
            .finish_non_exhaustive()
    }
}

impl ContinuationRadioQueue {
    pub fn song_radio(
        client: Arc<dyn RemoteMusicClient>,
        endpoint: WatchEndpoint,
        preload: Option<PlayableItem>,
    ) -> Self {
        Self::new(client, RadioSeed::Song { endpoint, preload })
    }

    pub fn album_radio(
        client: Arc<dyn RemoteMusicClient>,
        album_id: impl Into<String>,
        endpoint: WatchEndpoint,
    ) -> Self {
        Self::new(
            client,
            RadioSeed::Album {
                album_id: album_id.into(),
                endpoint,
            },
        )
    }

    pub fn new(client: Arc<dyn RemoteMusicClient>, seed: RadioSeed) -> Self {
        ContinuationRadioQueue {
            client,
            seed,
            state: PageState::Unstarted,
            spent: HashSet::new(),
        }
    }

    pub fn seed(&self) -> &RadioSeed {
        &self.seed
    }

    pub fn preload_item(&self) -> Option<&PlayableItem> {
        match &self.seed {
            RadioSeed::Song { preload, .. } => preload.as_ref(),
            RadioSeed::Album { .. } => None,
        }
    }

    // ==========================================
    // FIRST PAGE: initial_status()
    // ==========================================
    // 1. Album seed: fetch the album's own track list (fails the call if it fails)
    // 2. Fetch the first radio page with no continuation token
    // 3. Keep the page's continuation token
    // 4. Album seed: album tracks + radio items after the first album.len() positions
    // 5. Start at the server's selected index, or 0
    pub async fn initial_status(&mut self) -> Result<QueueStatus, QueueError> {
        if self.state != PageState::Unstarted {
            tracing::warn!("initial_status() called twice on a radio queue");
            return Ok(QueueStatus::empty());
        }

        let album_tracks = match &self.seed {
            RadioSeed::Album { album_id, .. } => {
                let tracks = self
                    .client
                    .album_tracks(album_id)
                    .await
                    .map_err(|source| QueueError::AlbumTracks {
                        album_id: album_id.clone(),
                        source,
                    })?;
                Some(tracks)
            }
            RadioSeed::Song { .. } => None,
        };

        let page = self
            .client
            .next_page(self.seed.endpoint(), None)
            .await
            .map_err(QueueError::RadioPage)?;

        tracing::debug!(
            items = page.items.len(),
            has_continuation = page.continuation.is_some(),
            "fetched first radio page"
        );
        self.state = PageState::after(page.continuation);

        let items = match album_tracks {
            Some(tracks) => merge_album_page(tracks, page.items),
            None => page.items,
        };
        let starting_index = starting_index(page.current_index, items.len());

        Ok(QueueStatus {
            title: page.title,
            items,
            starting_index,
        })
    }

    pub fn has_next_page(&self) -> bool {
        matches!(self.state, PageState::HasMore(_))
    }

    // ==========================================
    // MORE PAGES: next_page()
    // ==========================================
    // Spends the held token and returns only the newly fetched items.
    // Without a token (not started / exhausted) this is a no-op.
    pub async fn next_page(&mut self) -> Result<Vec<PlayableItem>, QueueError> {
        let token = match &self.state {
            PageState::HasMore(token) => token.clone(),
            PageState::Unstarted | PageState::Exhausted => {
                tracing::warn!(state = ?self.state, "next_page() called without a continuation");
                return Ok(Vec::new());
            }
        };

        let page = self
            .client
            .next_page(self.seed.endpoint(), Some(&token))
            .await
            .map_err(QueueError::RadioPage)?;
        self.spent.insert(token);

        self.state = match page.continuation {
            // Tokens are forward-only; handing back any spent one would cycle
            Some(next) if self.spent.contains(&next) => {
                tracing::warn!(
                    token = %next,
                    spent = self.spent.len(),
                    "server returned a spent continuation, ending radio"
                );
                PageState::Exhausted
            }
            other => PageState::after(other),
        };
        tracing::debug!(
            items = page.items.len(),
            has_more = self.has_next_page(),
            "fetched radio continuation"
        );

        Ok(page.items)
    }
}

// The radio page repeats the album's tracks at its head, in order. Those first
// album.len() positions are dropped by position, ids are not compared.
fn merge_album_page(album: Vec<PlayableItem>, radio: Vec<PlayableItem>) -> Vec<PlayableItem> {
    let overlap = album.len().min(radio.len());
    let mismatched = album
        .iter()
        .zip(&radio)
        .filter(|(a, r)| a.video_id != r.video_id)
        .count();
    if mismatched > 0 {
        tracing::warn!(mismatched, overlap, "radio head differs from album track list");
    }

    let mut merged = album;
    merged.extend(radio.into_iter().skip(overlap));
    merged
}

fn starting_index(suggested: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match suggested {
        Some(index) if index < len => Some(index),
        Some(index) => {
            tracing::debug!(index, len, "suggested index out of range, starting at 0");
            Some(0)
        }
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::youtube::testing::{items, page, ScriptedClient};

    fn song_queue(client: Arc<ScriptedClient>) -> ContinuationRadioQueue {
        ContinuationRadioQueue::song_radio(client, WatchEndpoint::song_radio("s"), None)
    }

    #[tokio::test]
    async fn song_radio_uses_page_directly() {
        let client = Arc::new(
            ScriptedClient::default().with_page(None, page(&["s", "r1", "r2"], Some("T1"), Some(0))),
        );
        let mut queue = song_queue(client);

        assert!(!queue.has_next_page());
        let status = queue.initial_status().await.unwrap();

        assert_eq!(status.title.as_deref(), Some("Radio"));
        assert_eq!(status.items, items(&["s", "r1", "r2"]));
        assert_eq!(status.starting_index, Some(0));
        assert!(queue.has_next_page());
    }

    #[tokio::test]
    async fn album_radio_drops_overlapping_head() {
        let client = Arc::new(
            ScriptedClient::default()
                .with_album(items(&["a1", "a2", "a3"]))
                .with_page(None, page(&["a1", "a2", "a3", "r1", "r2"], Some("T1"), Some(0))),
        );
        let mut queue =
            ContinuationRadioQueue::album_radio(client, "MPREb_a", WatchEndpoint::playlist("OLAK5uy_a"));

        let status = queue.initial_status().await.unwrap();

        assert_eq!(status.items, items(&["a1", "a2", "a3", "r1", "r2"]));
        assert_eq!(status.starting_index, Some(0));
    }

    #[test]
    fn merge_is_positional() {
        // Radio head does not match the album; positions are dropped anyway
        let merged = merge_album_page(items(&["a1", "a2"]), items(&["x1", "x2", "r1"]));
        assert_eq!(merged, items(&["a1", "a2", "r1"]));
    }

    #[test]
    fn merge_with_short_radio_page_keeps_album() {
        let merged = merge_album_page(items(&["a1", "a2", "a3"]), items(&["a1"]));
        assert_eq!(merged, items(&["a1", "a2", "a3"]));
    }

    #[tokio::test]
    async fn empty_album_relies_on_radio_page() {
        let client = Arc::new(
            ScriptedClient::default()
                .with_album(Vec::new())
                .with_page(None, page(&["r1", "r2"], None, Some(1))),
        );
        let mut queue = ContinuationRadioQueue::album_radio(client, "MPREb_e", WatchEndpoint::playlist("p"));

        let status = queue.initial_status().await.unwrap();

        assert_eq!(status.items, items(&["r1", "r2"]));
        assert_eq!(status.starting_index, Some(1));
        assert!(!queue.has_next_page());
    }

    #[tokio::test]
    async fn album_failure_propagates_before_radio_call() {
        let client = Arc::new(ScriptedClient::default().with_page(None, page(&["r1"], None, None)));
        let mut queue =
            ContinuationRadioQueue::album_radio(client.clone(), "MPREb_x", WatchEndpoint::playlist("p"));

        let err = queue.initial_status().await.unwrap_err();

        assert!(matches!(err, QueueError::AlbumTracks { ref album_id, .. } if album_id == "MPREb_x"));
        assert!(client.requested().is_empty());
        assert!(!queue.has_next_page());
    }

    #[tokio::test]
    async fn radio_failure_propagates() {
        let client = Arc::new(ScriptedClient::default());
        let mut queue = song_queue(client);

        let err = queue.initial_status().await.unwrap_err();

        assert!(matches!(err, QueueError::RadioPage(ClientError::Api { status: 500, .. })));
        assert!(!queue.has_next_page());
    }

    #[tokio::test]
    async fn next_page_failure_keeps_token() {
        let client = Arc::new(ScriptedClient::default().with_page(None, page(&["s"], Some("T1"), None)));
        let mut queue = song_queue(client.clone());
        queue.initial_status().await.unwrap();

        assert!(queue.next_page().await.is_err());
        assert!(queue.has_next_page());
        assert_eq!(client.requested(), vec![None, Some("T1".to_string())]);
    }

    #[tokio::test]
    async fn pages_until_exhausted() {
        let client = Arc::new(
            ScriptedClient::default()
                .with_page(None, page(&["s"], Some("T1"), None))
                .with_page(Some("T1"), page(&["r1", "r2"], Some("T2"), None))
                .with_page(Some("T2"), page(&["r3"], None, None)),
        );
        let mut queue = song_queue(client.clone());
        queue.initial_status().await.unwrap();

        let mut loaded = Vec::new();
        let mut calls = 0;
        while queue.has_next_page() {
            loaded.extend(queue.next_page().await.unwrap());
            calls += 1;
            assert!(calls <= 2, "radio never ran out");
        }

        assert_eq!(loaded, items(&["r1", "r2", "r3"]));
        assert!(queue.next_page().await.unwrap().is_empty());
        assert_eq!(client.requested().len(), 3);
    }

    #[tokio::test]
    async fn repeated_token_ends_radio() {
        let client = Arc::new(
            ScriptedClient::default()
                .with_page(None, page(&["s"], Some("T1"), None))
                .with_page(Some("T1"), page(&["r1"], Some("T1"), None)),
        );
        let mut queue = song_queue(client);
        queue.initial_status().await.unwrap();

        assert_eq!(queue.next_page().await.unwrap(), items(&["r1"]));
        assert!(!queue.has_next_page());
    }

    #[tokio::test]
    async fn alternating_tokens_end_radio() {
        let client = Arc::new(
            ScriptedClient::default()
                .with_page(None, page(&["s"], Some("T1"), None))
                .with_page(Some("T1"), page(&["r1"], Some("T2"), None))
                .with_page(Some("T2"), page(&["r2"], Some("T1"), None)),
        );
        let mut queue = song_queue(client.clone());
        queue.initial_status().await.unwrap();

        let mut loaded = Vec::new();
        let mut calls = 0;
        while queue.has_next_page() {
            loaded.extend(queue.next_page().await.unwrap());
            calls += 1;
            assert!(calls <= 2, "radio kept cycling between tokens");
        }

        assert_eq!(loaded, items(&["r1", "r2"]));
        assert_eq!(
            client.requested(),
            vec![None, Some("T1".to_string()), Some("T2".to_string())]
        );
    }

    #[tokio::test]
    async fn misuse_is_a_no_op() {
        let client = Arc::new(ScriptedClient::default().with_page(None, page(&["s"], Some("T1"), None)));
        let mut queue = song_queue(client.clone());

        // before the first page
        assert!(queue.next_page().await.unwrap().is_empty());
        assert!(client.requested().is_empty());

        queue.initial_status().await.unwrap();
        let again = queue.initial_status().await.unwrap();
        assert_eq!(again, QueueStatus::empty());
        assert_eq!(client.requested().len(), 1);
    }

    #[test]
    fn preload_only_for_song_seed() {
        let client: Arc<dyn RemoteMusicClient> = Arc::new(ScriptedClient::default());
        let seed_item = PlayableItem::new("s", "Seed");

        let song = ContinuationRadioQueue::song_radio(
            client.clone(),
            WatchEndpoint::song_radio("s"),
            Some(seed_item.clone()),
        );
        let album = ContinuationRadioQueue::album_radio(client, "MPREb_a", WatchEndpoint::playlist("p"));

        assert_eq!(song.preload_item(), Some(&seed_item));
        assert_eq!(album.preload_item(), None);
    }

    #[test]
    fn starting_index_bounds() {
        assert_eq!(starting_index(Some(2), 3), Some(2));
        assert_eq!(starting_index(Some(3), 3), Some(0));
        assert_eq!(starting_index(None, 3), Some(0));
        assert_eq!(starting_index(Some(0), 0), None);
    }
}

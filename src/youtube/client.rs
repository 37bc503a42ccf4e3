// ==========================================
// REMOTE MUSIC CLIENT
// ==========================================
// Everything the queues need from YouTube Music, behind one trait.
//
// WatchEndpoint
//   - The radio seed (video id, playlist id, params)
//   - Sent unchanged with every page request of one queue
//
// ContinuationToken
//   - Opaque cursor handed back by the server with each page
//   - Spent once; the next page carries a new one or none at all
//
// NextPage
//   - One radio page: items, the server's selected index, the next token
//
// AlbumPage
//   - Album title, its audio playlist id (the album radio seed) and tracks

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::queue::PlayableItem;

/// Seed of a "next"/radio request.
///
/// Mirrors the InnerTube `watchEndpoint` object. Built once when a queue is
/// created and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEndpoint {
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
    pub params: Option<String>,
    pub playlist_set_video_id: Option<String>,
    pub index: Option<u32>,
}

impl WatchEndpoint {
    /// Endless radio seeded by one song
    pub fn song_radio(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        WatchEndpoint {
            playlist_id: Some(format!("RDAMVM{}", video_id)),
            video_id: Some(video_id),
            params: None,
            playlist_set_video_id: None,
            index: None,
        }
    }

    /// Radio seeded by a playlist, e.g. an album's audio playlist ("OLAK5uy_...")
    pub fn playlist(playlist_id: impl Into<String>) -> Self {
        WatchEndpoint {
            video_id: None,
            playlist_id: Some(playlist_id.into()),
            params: None,
            playlist_set_video_id: None,
            index: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }
}

/// Opaque cursor handed out with a page; passing it back yields the next page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        ContinuationToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tokens are long base64 blobs, the prefix is enough to tell them apart in logs
        let prefix: String = self.0.chars().take(12).collect();
        if prefix.len() < self.0.len() {
            write!(f, "{}…", prefix)
        } else {
            f.write_str(&self.0)
        }
    }
}

/// One page of a "next" response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NextPage {
    pub title: Option<String>,
    pub items: Vec<PlayableItem>,
    /// Position of the item the server marked as selected
    pub current_index: Option<usize>,
    /// None when the server has nothing more for this endpoint
    pub continuation: Option<ContinuationToken>,
}

/// Album page as returned by `browse`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlbumPage {
    pub title: Option<String>,
    /// Audio playlist of the album, seed for album radio
    pub playlist_id: Option<String>,
    pub tracks: Vec<PlayableItem>,
}

impl AlbumPage {
    pub fn radio_endpoint(&self) -> Option<WatchEndpoint> {
        self.playlist_id.as_deref().map(WatchEndpoint::playlist)
    }
}

#[async_trait]
pub trait RemoteMusicClient: Send + Sync {
    /// Ordered track list of an album, authoritative for the album's own songs
    async fn album_tracks(&self, album_id: &str) -> ClientResult<Vec<PlayableItem>>;

    /// First page (no token) or a continuation page of a watch/radio endpoint
    async fn next_page(
        &self,
        endpoint: &WatchEndpoint,
        continuation: Option<&ContinuationToken>,
    ) -> ClientResult<NextPage>;
}

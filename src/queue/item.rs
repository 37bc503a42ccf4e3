// ==========================================
// PLAYABLE ITEM
// ==========================================
// The value type every queue hands to the playback controller.
// Produced by the remote client (radio pages, album pages) and by local
// storage (downloads, library). Never mutated once built.

use serde::{Deserialize, Serialize};

/// Link to an artist page (browse id starts with "UC" on YouTube Music)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
    pub browse_id: Option<String>,
}

impl ArtistRef {
    pub fn new(name: impl Into<String>, browse_id: Option<String>) -> Self {
        ArtistRef {
            name: name.into(),
            browse_id,
        }
    }
}

/// Link to an album page (browse id starts with "MPRE")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub title: String,
    pub browse_id: Option<String>,
}

impl AlbumRef {
    pub fn new(title: impl Into<String>, browse_id: Option<String>) -> Self {
        AlbumRef {
            title: title.into(),
            browse_id,
        }
    }
}

// Where the audio for an item comes from.
// Local = downloaded/cached file, Remote = streamed from YouTube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSource {
    Local,
    Remote,
}

// ==========================================
// PLAYABLE ITEM STRUCT
// ==========================================
// Fields:
//
// video_id: String
//   - YouTube video id, e.g. "dQw4w9WgXcQ"
//   - Opaque identity of the item; two items are the same track when ids match
//
// title / artists / album
//   - Display metadata, exactly as the remote page or the library gave it
//
// duration: Option<u64>
//   - Length in seconds; None when the source did not report it
//     (radio entries for live streams have no length text)
//
// source: ItemSource
//   - Local or Remote, decides whether the player needs a stream URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableItem {
    pub video_id: String,
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub duration: Option<u64>,
    pub source: ItemSource,
}

impl PlayableItem {
    // Remote item with only id and title; metadata is added with the with_* methods
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        PlayableItem {
            video_id: video_id.into(),
            title: title.into(),
            artists: Vec::new(),
            album: None,
            duration: None,
            source: ItemSource::Remote,
        }
    }

    pub fn with_artists(mut self, artists: Vec<ArtistRef>) -> Self {
        self.artists = artists;
        self
    }

    pub fn with_album(mut self, album: AlbumRef) -> Self {
        self.album = Some(album);
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_source(mut self, source: ItemSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_local(&self) -> bool {
        self.source == ItemSource::Local
    }

    // "Artist A, Artist B" for display; empty string when unknown
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn watch_url(&self) -> String {
        format!("https://music.youtube.com/watch?v={}", self.video_id)
    }
}

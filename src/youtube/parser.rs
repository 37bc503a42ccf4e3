// InnerTube response extraction
// Walks the raw JSON of "next" and "browse" responses with serde_json::Value
// and pulls out only what the queues use.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::queue::{AlbumRef, ArtistRef, PlayableItem};

use super::client::{AlbumPage, ContinuationToken, NextPage};

const WATCH_PANEL_PATH: &str = "/contents/singleColumnMusicWatchNextResultsRenderer/tabbedRenderer/watchNextTabbedResultsRenderer/tabs/0/tabRenderer/content/musicQueueRenderer/content/playlistPanelRenderer";
const CONTINUATION_PANEL_PATH: &str = "/continuationContents/playlistPanelContinuation";

const ALBUM_SHELF_PATHS: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/secondaryContents/sectionListRenderer/contents/0/musicShelfRenderer/contents",
    "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicShelfRenderer/contents",
];
const ALBUM_TITLE_PATHS: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer/title/runs/0/text",
    "/header/musicDetailHeaderRenderer/title/runs/0/text",
];
const ALBUM_ARTIST_PATHS: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer/straplineTextOne/runs",
    "/header/musicDetailHeaderRenderer/subtitle/runs",
];

// ==========================================
// NEXT / RADIO PAGES
// ==========================================

/// Parses either a first "next" page or a continuation page
pub fn parse_next_response(json: &Value) -> ClientResult<NextPage> {
    let panel = json
        .pointer(WATCH_PANEL_PATH)
        .or_else(|| json.pointer(CONTINUATION_PANEL_PATH))
        .ok_or_else(|| ClientError::Malformed("no playlist panel in next response".to_string()))?;

    let mut items = Vec::new();
    let mut current_index = None;

    let contents = panel["contents"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    for entry in contents {
        let renderer = match video_renderer(entry) {
            Some(renderer) => renderer,
            // automix previews, separators, ...
            None => continue,
        };
        let item = match panel_video_item(renderer) {
            Some(item) => item,
            None => continue,
        };
        if renderer["selected"].as_bool() == Some(true) && current_index.is_none() {
            current_index = Some(items.len());
        }
        items.push(item);
    }

    Ok(NextPage {
        title: panel["title"].as_str().map(str::to_string),
        items,
        current_index,
        continuation: continuation_token(panel),
    })
}

fn video_renderer(entry: &Value) -> Option<&Value> {
    entry
        .get("playlistPanelVideoRenderer")
        .or_else(|| entry.pointer("/playlistPanelVideoWrapperRenderer/primaryRenderer/playlistPanelVideoRenderer"))
}

fn panel_video_item(renderer: &Value) -> Option<PlayableItem> {
    let video_id = renderer["videoId"].as_str()?;
    let title = first_run_text(&renderer["title"]).unwrap_or_default();

    let byline = renderer["longBylineText"]["runs"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let (artists, album) = byline_refs(byline);

    let mut item = PlayableItem::new(video_id, title).with_artists(artists);
    if let Some(album) = album {
        item = item.with_album(album);
    }
    if let Some(seconds) = first_run_text(&renderer["lengthText"]).and_then(|t| parse_duration(&t)) {
        item = item.with_duration(seconds);
    }
    Some(item)
}

// Byline runs look like: [artist, " & ", artist, " • ", album, " • ", year]
fn byline_refs(runs: &[Value]) -> (Vec<ArtistRef>, Option<AlbumRef>) {
    let mut artists = Vec::new();
    let mut album = None;

    for run in runs {
        let text = match run["text"].as_str() {
            Some(text) => text,
            None => continue,
        };
        match run_browse_id(run) {
            Some(id) if id.starts_with("UC") => {
                artists.push(ArtistRef::new(text, Some(id.to_string())));
            }
            Some(id) if id.starts_with("MPRE") => {
                album = Some(AlbumRef::new(text, Some(id.to_string())));
            }
            _ => {}
        }
    }

    // Unlinked artists (user uploads, some videos): first run is the artist name
    if artists.is_empty() {
        if let Some(text) = runs.first().and_then(|run| run["text"].as_str()) {
            if !text.trim().is_empty() {
                artists.push(ArtistRef::new(text, None));
            }
        }
    }

    (artists, album)
}

fn run_browse_id(run: &Value) -> Option<&str> {
    run.pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
}

fn continuation_token(panel: &Value) -> Option<ContinuationToken> {
    let continuations = panel["continuations"].as_array()?;
    continuations.iter().find_map(|c| {
        c.pointer("/nextRadioContinuationData/continuation")
            .or_else(|| c.pointer("/nextContinuationData/continuation"))
            .and_then(Value::as_str)
            .map(ContinuationToken::new)
    })
}

// ==========================================
// ALBUM PAGES
// ==========================================

/// Parses the `browse` response of an album page
pub fn parse_album_response(json: &Value) -> ClientResult<AlbumPage> {
    let shelf = ALBUM_SHELF_PATHS
        .iter()
        .find_map(|path| json.pointer(path))
        .and_then(Value::as_array)
        .ok_or_else(|| ClientError::Malformed("no track shelf in album response".to_string()))?;

    let title = ALBUM_TITLE_PATHS
        .iter()
        .find_map(|path| json.pointer(path))
        .and_then(Value::as_str)
        .map(str::to_string);

    let header_artists = ALBUM_ARTIST_PATHS
        .iter()
        .find_map(|path| json.pointer(path))
        .and_then(Value::as_array)
        .map(|runs| linked_artists(runs))
        .unwrap_or_default();

    let album_ref = title.as_ref().map(|t| AlbumRef::new(t.clone(), None));

    let tracks = shelf
        .iter()
        .filter_map(|entry| entry.get("musicResponsiveListItemRenderer"))
        .filter_map(|renderer| album_track(renderer, &header_artists, album_ref.as_ref()))
        .collect();

    Ok(AlbumPage {
        title,
        playlist_id: find_string(json, "playlistId", &|id: &str| id.starts_with("OLAK5uy_"))
            .map(str::to_string),
        tracks,
    })
}

fn album_track(
    renderer: &Value,
    header_artists: &[ArtistRef],
    album: Option<&AlbumRef>,
) -> Option<PlayableItem> {
    // Greyed out (unavailable) tracks have no playlistItemData
    let video_id = renderer.pointer("/playlistItemData/videoId")?.as_str()?;
    let title = renderer
        .pointer("/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text")
        .and_then(first_run_text)
        .unwrap_or_default();

    let artists = renderer
        .pointer("/flexColumns/1/musicResponsiveListItemFlexColumnRenderer/text/runs")
        .and_then(Value::as_array)
        .map(|runs| linked_artists(runs))
        .filter(|artists| !artists.is_empty())
        .unwrap_or_else(|| header_artists.to_vec());

    let mut item = PlayableItem::new(video_id, title).with_artists(artists);
    if let Some(album) = album {
        item = item.with_album(album.clone());
    }
    let duration = renderer
        .pointer("/fixedColumns/0/musicResponsiveListItemFixedColumnRenderer/text")
        .and_then(first_run_text)
        .and_then(|text| parse_duration(&text));
    if let Some(seconds) = duration {
        item = item.with_duration(seconds);
    }
    Some(item)
}

fn linked_artists(runs: &[Value]) -> Vec<ArtistRef> {
    runs.iter()
        .filter_map(|run| {
            let id = run_browse_id(run).filter(|id| id.starts_with("UC"))?;
            let name = run["text"].as_str()?;
            Some(ArtistRef::new(name, Some(id.to_string())))
        })
        .collect()
}

// ==========================================
// HELPERS
// ==========================================

fn first_run_text(text: &Value) -> Option<String> {
    text.pointer("/runs/0/text")
        .or_else(|| text.get("simpleText"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

// Depth-first search for the first string under `key` accepted by `accept`
fn find_string<'a>(json: &'a Value, key: &str, accept: &dyn Fn(&str) -> bool) -> Option<&'a str> {
    match json {
        Value::Object(map) => {
            if let Some(found) = map.get(key).and_then(Value::as_str).filter(|s| accept(s)) {
                return Some(found);
            }
            map.values().find_map(|v| find_string(v, key, accept))
        }
        Value::Array(values) => values.iter().find_map(|v| find_string(v, key, accept)),
        _ => None,
    }
}

/// "3:45" -> 225, "1:02:03" -> 3723
pub fn parse_duration(text: &str) -> Option<u64> {
    let mut seconds = 0u64;
    let mut parts = 0;
    for part in text.trim().split(':') {
        let value: u64 = part.parse().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(value)?;
        parts += 1;
    }
    if parts > 3 {
        return None;
    }
    Some(seconds)
}

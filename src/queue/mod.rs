// ==========================================
// QUEUE MODULE
// ==========================================
// Turns a "start playing X" action into an ordered, lazily extended list of
// playable items. Three kinds of queue share one surface:
//
// - Empty:      nothing to play, nothing to fetch
// - StaticList: a closed list already in memory
// - Radio:      a remote radio paged with continuation tokens
//
// The playback controller only ever talks to `Queue`:
//   preload_item() -> initial_status() once -> has_next_page()/next_page() as needed

pub mod empty;
pub mod item;
pub mod radio;
pub mod static_list;

pub use empty::EmptyQueue;
pub use item::{AlbumRef, ArtistRef, ItemSource, PlayableItem};
pub use radio::{ContinuationRadioQueue, RadioSeed};
pub use static_list::StaticListQueue;

use crate::error::QueueError;

/// First page of a queue, as returned by `Queue::initial_status`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueStatus {
    pub title: Option<String>,
    /// Playback order
    pub items: Vec<PlayableItem>,
    /// Item to start with; None only when `items` is empty
    pub starting_index: Option<usize>,
}

impl QueueStatus {
    pub fn empty() -> Self {
        QueueStatus::default()
    }

    pub fn starting_item(&self) -> Option<&PlayableItem> {
        self.starting_index.and_then(|index| self.items.get(index))
    }
}

#[derive(Debug)]
pub enum Queue {
    Empty(EmptyQueue),
    StaticList(StaticListQueue),
    Radio(ContinuationRadioQueue),
}

impl Default for Queue {
    fn default() -> Self {
        Queue::Empty(EmptyQueue)
    }
}

impl From<StaticListQueue> for Queue {
    fn from(queue: StaticListQueue) -> Self {
        Queue::StaticList(queue)
    }
}

impl From<ContinuationRadioQueue> for Queue {
    fn from(queue: ContinuationRadioQueue) -> Self {
        Queue::Radio(queue)
    }
}

impl Queue {
    pub fn empty() -> Self {
        Queue::default()
    }

    pub fn is_empty_queue(&self) -> bool {
        matches!(self, Queue::Empty(_))
    }

    /// Metadata of the first item, available without any network call
    pub fn preload_item(&self) -> Option<&PlayableItem> {
        match self {
            Queue::Empty(queue) => queue.preload_item(),
            Queue::StaticList(queue) => queue.preload_item(),
            Queue::Radio(queue) => queue.preload_item(),
        }
    }

    /// Fetches the first page. Call once per queue.
    pub async fn initial_status(&mut self) -> Result<QueueStatus, QueueError> {
        match self {
            Queue::Empty(queue) => Ok(queue.initial_status()),
            Queue::StaticList(queue) => Ok(queue.initial_status()),
            Queue::Radio(queue) => queue.initial_status().await,
        }
    }

    pub fn has_next_page(&self) -> bool {
        match self {
            Queue::Empty(queue) => queue.has_next_page(),
            Queue::StaticList(queue) => queue.has_next_page(),
            Queue::Radio(queue) => queue.has_next_page(),
        }
    }

    /// Only the newly fetched items; empty when there is no next page
    pub async fn next_page(&mut self) -> Result<Vec<PlayableItem>, QueueError> {
        match self {
            Queue::Empty(queue) => Ok(queue.next_page()),
            Queue::StaticList(queue) => Ok(queue.next_page()),
            Queue::Radio(queue) => queue.next_page().await,
        }
    }
}

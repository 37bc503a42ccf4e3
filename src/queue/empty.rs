// Queue with nothing in it.
// Used by the controller before anything is played and after a failed start.

use super::item::PlayableItem;
use super::QueueStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyQueue;

impl EmptyQueue {
    pub fn preload_item(&self) -> Option<&PlayableItem> {
        None
    }

    pub fn initial_status(&self) -> QueueStatus {
        QueueStatus::empty()
    }

    pub fn has_next_page(&self) -> bool {
        false
    }

    pub fn next_page(&self) -> Vec<PlayableItem> {
        Vec::new()
    }
}

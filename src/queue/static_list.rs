// ==========================================
// STATIC LIST QUEUE
// ==========================================
// A closed, already materialized list of items: a user's selection,
// a local playlist, a shuffled library. No network, no further pages.

use rand::seq::SliceRandom;
use rand::Rng;

use super::item::PlayableItem;
use super::QueueStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticListQueue {
    title: Option<String>,
    items: Vec<PlayableItem>,
}

impl StaticListQueue {
    pub fn new(title: Option<String>, items: Vec<PlayableItem>) -> Self {
        StaticListQueue { title, items }
    }

    // Same list in random order (thread-local RNG)
    pub fn shuffled(title: Option<String>, items: Vec<PlayableItem>) -> Self {
        Self::shuffled_with(title, items, &mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(
        title: Option<String>,
        mut items: Vec<PlayableItem>,
        rng: &mut R,
    ) -> Self {
        items.shuffle(rng);
        StaticListQueue { title, items }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn items(&self) -> &[PlayableItem] {
        &self.items
    }

    // The whole list is known up front, so there is nothing to preload
    pub fn preload_item(&self) -> Option<&PlayableItem> {
        None
    }

    // Always starts at the first item; an empty list has no starting index
    pub fn initial_status(&self) -> QueueStatus {
        let starting_index = if self.items.is_empty() { None } else { Some(0) };
        QueueStatus {
            title: self.title.clone(),
            items: self.items.clone(),
            starting_index,
        }
    }

    pub fn has_next_page(&self) -> bool {
        false
    }

    pub fn next_page(&self) -> Vec<PlayableItem> {
        tracing::warn!("next_page() called on a closed list queue");
        Vec::new()
    }
}

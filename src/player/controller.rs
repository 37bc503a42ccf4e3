// ==========================================
// PLAYBACK CONTROLLER
// ==========================================
// Owns the active Queue and the navigation window the player walks through:
//
// upcoming: VecDeque<PlayableItem>
//   - Loaded items not played yet; front = plays next
//   - Grows at the back when a new radio page arrives
//
// current: Option<PlayableItem>
//   - The item playing now (or the preload hint while the first page loads)
//
// history: Vec<PlayableItem>
//   - Already played items, [oldest ... newest], capped at history_limit
//
// A new "play" action swaps in a fresh Queue and resets all three.
// When upcoming runs low (<= prefetch_threshold) and the queue has more
// pages, next() fetches pages until it is topped up before advancing.

use std::collections::VecDeque;

use crate::config::AppConfig;
use crate::error::QueueError;
use crate::queue::{PlayableItem, Queue, QueueStatus};

pub struct PlaybackController {
    queue: Queue,
    title: Option<String>,
    upcoming: VecDeque<PlayableItem>,
    current: Option<PlayableItem>,
    history: Vec<PlayableItem>,
    prefetch_threshold: usize,
    history_limit: usize,
}

impl PlaybackController {
    pub fn new(prefetch_threshold: usize, history_limit: usize) -> Self {
        PlaybackController {
            queue: Queue::empty(),
            title: None,
            upcoming: VecDeque::new(),
            current: None,
            history: Vec::new(),
            prefetch_threshold,
            history_limit,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.prefetch_threshold, config.history_limit)
    }

    // ==========================================
    // STARTING PLAYBACK: play()
    // ==========================================
    // 1. Replace the old queue and clear the window
    // 2. Show the preload hint as current right away (no network)
    // 3. Fetch the first page and position at its starting index
    //    (items before it go to history)
    // 4. On failure: fall back to the empty queue and hand the error back
    pub async fn play(&mut self, queue: Queue) -> Result<(), QueueError> {
        self.reset();
        self.queue = queue;

        if let Some(item) = self.queue.preload_item() {
            tracing::debug!(video_id = %item.video_id, "showing preload item");
            self.current = Some(item.clone());
        }

        match self.queue.initial_status().await {
            Ok(status) => {
                self.load_status(status);
                tracing::info!(
                    title = self.title.as_deref().unwrap_or(""),
                    upcoming = self.upcoming.len(),
                    more_pages = self.queue.has_next_page(),
                    "queue started"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start queue, falling back to empty queue");
                self.queue = Queue::empty();
                self.reset();
                Err(e)
            }
        }
    }

    fn load_status(&mut self, status: QueueStatus) {
        self.title = status.title;
        let start = match status.starting_index {
            Some(start) => start,
            None => {
                self.current = None;
                return;
            }
        };

        let mut items = status.items.into_iter();
        for item in items.by_ref().take(start) {
            self.push_history(item);
        }
        self.current = items.next();
        self.upcoming.extend(items);
    }

    fn reset(&mut self) {
        self.title = None;
        self.upcoming.clear();
        self.current = None;
        self.history.clear();
    }

    // ==========================================
    // NAVIGATION: next()
    // ==========================================
    // Tops up from the queue if needed, then:
    // - current goes to history
    // - front of upcoming becomes current
    //
    // A failed page fetch stops paging this queue. It is only returned as an
    // error when there is nothing left to play; otherwise playback goes on.
    pub async fn next(&mut self) -> Result<Option<PlayableItem>, QueueError> {
        if let Err(e) = self.top_up().await {
            if self.upcoming.is_empty() {
                return Err(e);
            }
            tracing::warn!(error = %e, "stopped paging after a failed fetch");
        }

        if let Some(track) = self.current.take() {
            self.push_history(track);
        }

        if let Some(track) = self.upcoming.pop_front() {
            self.current = Some(track.clone());
            return Ok(Some(track));
        }

        self.current = None;
        Ok(None)
    }

    // A page can come back with no playable items but a fresh token,
    // so this keeps fetching until the window is above the threshold
    async fn top_up(&mut self) -> Result<(), QueueError> {
        while self.upcoming.len() <= self.prefetch_threshold && self.queue.has_next_page() {
            match self.queue.next_page().await {
                Ok(items) => {
                    tracing::info!(added = items.len(), "appended radio page");
                    self.upcoming.extend(items);
                }
                Err(e) => {
                    self.queue = Queue::empty();
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    // ==========================================
    // NAVIGATION: previous()
    // ==========================================
    // Current goes back to the front of upcoming, last history item becomes current.
    // Returns None (and clears current) when there is no history.
    pub fn previous(&mut self) -> Option<PlayableItem> {
        if let Some(current) = self.current.take() {
            self.upcoming.push_front(current);
        }

        if let Some(prev_track) = self.history.pop() {
            self.current = Some(prev_track.clone());
            return Some(prev_track);
        }

        self.current = None;
        None
    }

    fn push_history(&mut self, item: PlayableItem) {
        self.history.push(item);
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(0..excess);
        }
    }

    /// Adds an item after everything already loaded
    pub fn enqueue(&mut self, item: PlayableItem) {
        self.upcoming.push_back(item);
    }

    pub fn current(&self) -> Option<&PlayableItem> {
        self.current.as_ref()
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &PlayableItem> {
        self.upcoming.iter()
    }

    pub fn upcoming_len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn history(&self) -> &[PlayableItem] {
        &self.history
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn has_more_pages(&self) -> bool {
        self.queue.has_next_page()
    }

    /// Nothing upcoming and nothing left to fetch
    pub fn is_exhausted(&self) -> bool {
        self.upcoming.is_empty() && !self.queue.has_next_page()
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

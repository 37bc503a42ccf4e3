// Playback queues for a YouTube Music client
//
// queue:   the Queue sum type (empty / static list / continuation radio)
// youtube: the RemoteMusicClient boundary and its InnerTube implementation
// player:  a playback controller that drives a Queue
// config:  user configuration
// error:   error types

pub mod config;
pub mod error;
pub mod player;
pub mod queue;
pub mod youtube;

pub use config::AppConfig;
pub use error::{ClientError, ConfigError, QueueError};
pub use player::PlaybackController;
pub use queue::{
    ContinuationRadioQueue, EmptyQueue, PlayableItem, Queue, QueueStatus, StaticListQueue,
};
pub use youtube::{ContinuationToken, InnerTubeClient, NextPage, RemoteMusicClient, WatchEndpoint};

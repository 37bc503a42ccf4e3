// Error types shared by the remote client, the queues and the config loader

use thiserror::Error;

/// Result type for calls going through a `RemoteMusicClient`
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failures of a remote music call
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not valid JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status
    #[error("YouTube API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Album, playlist or video does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// JSON was valid but did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// Builds an error from an HTTP status code and the response body
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound(message.into()),
            _ => Self::Api {
                status,
                message: message.into(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Failures surfaced by `Queue::initial_status` and `Queue::next_page`
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("failed to fetch tracks of album {album_id}: {source}")]
    AlbumTracks {
        album_id: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to fetch radio page: {0}")]
    RadioPage(#[source] ClientError),
}

impl QueueError {
    /// The remote failure behind this queue error
    pub fn client_error(&self) -> &ClientError {
        match self {
            QueueError::AlbumTracks { source, .. } => source,
            QueueError::RadioPage(source) => source,
        }
    }
}

/// Failures while loading or saving `AppConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not find a config directory for this platform")]
    NoConfigDir,

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

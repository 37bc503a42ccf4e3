// YouTube Music remote access
// client.rs: the RemoteMusicClient trait and its value types
// innertube.rs: the HTTP implementation
// parser.rs: JSON response extraction

pub mod client;
pub mod innertube;
pub mod parser;

pub use client::{AlbumPage, ContinuationToken, NextPage, RemoteMusicClient, WatchEndpoint};
pub use innertube::InnerTubeClient;

#[cfg(test)]
pub(crate) mod testing;

// Command line entry point
// Starts a radio (from a song or an album) and prints the queue as pages load:
//
//   youtube-music-queue radio <videoId> [pages]
//   youtube-music-queue album <browseId> [pages]

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use youtube_music_queue::{
    AppConfig, ContinuationRadioQueue, InnerTubeClient, PlayableItem, PlaybackController, Queue,
    WatchEndpoint,
};

const USAGE: &str = "usage: youtube-music-queue <radio <videoId> | album <browseId>> [pages]";
const DEFAULT_PAGES: usize = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the listing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, id) = match (args.first(), args.get(1)) {
        (Some(mode), Some(id)) => (mode.as_str(), id.as_str()),
        _ => bail!(USAGE),
    };
    let pages = match args.get(2) {
        Some(raw) => raw.parse().with_context(|| format!("invalid page count: {}", raw))?,
        None => DEFAULT_PAGES,
    };

    let config = AppConfig::load().context("failed to load config")?;
    let client = Arc::new(InnerTubeClient::new(&config).context("failed to build HTTP client")?);

    let queue: Queue = match mode {
        "radio" => {
            ContinuationRadioQueue::song_radio(client, WatchEndpoint::song_radio(id), None).into()
        }
        "album" => {
            // The queue asks for these tracks again; the client keeps the page
            let album = client
                .album(id)
                .await
                .with_context(|| format!("failed to load album {}", id))?;
            let endpoint = album
                .radio_endpoint()
                .with_context(|| format!("album {} has no audio playlist", id))?;
            ContinuationRadioQueue::album_radio(client, id, endpoint).into()
        }
        _ => bail!(USAGE),
    };

    let mut controller = PlaybackController::from_config(&config);
    controller.play(queue).await.context("failed to start queue")?;

    println!("{}", controller.title().unwrap_or("(untitled queue)"));
    for item in controller.history() {
        println!("    {}", describe(item));
    }
    if let Some(item) = controller.current() {
        println!("  > {}", describe(item));
    }
    for item in controller.upcoming() {
        println!("    {}", describe(item));
    }

    // Walk forward through the loaded items; every time the controller
    // pulls a page the new items are printed
    let mut pages_loaded = 0;
    while pages_loaded < pages && controller.has_more_pages() {
        let before = controller.upcoming_len();
        let playing = match controller.next().await? {
            Some(item) => item,
            None => break,
        };
        let added = (controller.upcoming_len() + 1).saturating_sub(before);
        if added > 0 {
            pages_loaded += 1;
            println!("-- page {} --", pages_loaded);
            let window: Vec<&PlayableItem> =
                std::iter::once(&playing).chain(controller.upcoming()).collect();
            for item in &window[window.len() - added..] {
                println!("    {}", describe(item));
            }
        }
    }

    if !controller.has_more_pages() {
        println!("-- end of radio --");
    }
    Ok(())
}

fn describe(item: &PlayableItem) -> String {
    let duration = item
        .duration
        .map(|secs| format!(" [{:02}:{:02}]", secs / 60, secs % 60))
        .unwrap_or_default();
    format!("{} - {}{}", item.title, item.artist_line(), duration)
}

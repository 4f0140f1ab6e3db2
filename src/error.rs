use thiserror::Error;

/// Error types for Apple Music metadata extraction.
///
/// Extraction is best-effort: the extractors return these errors so callers can
/// tell *why* nothing came back, but [`AppleMusicExtractor`](crate::AppleMusicExtractor)
/// collapses every kind except [`AppleMusicError::Stream`] into an empty response.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use applemusic_meta::{AppleMusicClient, AppleMusicError};
///
/// #[tokio::main]
/// async fn main() {
///     let client = AppleMusicClient::new(Box::new(http_client::native::NativeClient::new()));
///
///     match client.get_album("https://music.apple.com/us/album/x/1").await {
///         Ok(album) => println!("{} tracks", album.tracks.len()),
///         Err(AppleMusicError::Http(msg)) => eprintln!("Network error: {}", msg),
///         Err(AppleMusicError::Parse(msg)) => eprintln!("Page layout changed? {}", msg),
///         Err(e) => eprintln!("Other error: {}", e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppleMusicError {
    /// HTTP/network related errors.
    ///
    /// The page fetcher never propagates transport failures itself; this is what an
    /// extractor reports when the fetcher came back empty-handed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse the storefront's response.
    ///
    /// This can happen when Apple changes their HTML structure or the embedded
    /// JSON payload no longer has the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The query is not usable as input.
    ///
    /// Returned for strings that look like links but match none of the recognized
    /// song, album, or playlist shapes.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The page was fetched and parsed but carried nothing usable.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No playable stream could be produced for a track.
    ///
    /// This is the only error the extractor facade surfaces to its caller.
    #[error("Stream unavailable: {0}")]
    Stream(String),
}

impl From<serde_json::Error> for AppleMusicError {
    fn from(err: serde_json::Error) -> Self {
        AppleMusicError::Parse(err.to_string())
    }
}

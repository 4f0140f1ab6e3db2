use crate::classify::{classify, QueryKind};
use crate::{AppleMusicError, Collection, Result, Track};
use async_trait::async_trait;

/// Trait for the four storefront extractors, so the facade can be driven by a
/// mock in tests.
///
/// Every method performs at most one page fetch. Failures come back as
/// [`AppleMusicError`] values; none of them panic.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockStorefrontExtractor`
/// that implements this trait using the `mockall` library.
///
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait StorefrontExtractor {
    /// Run a free-text search and return the track results of the first page.
    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Fetch a single song from a `/song/` or `/album/...?i=` link.
    async fn get_song(&self, link: &str) -> Result<Track>;

    /// Fetch an album and its tracks.
    async fn get_album(&self, link: &str) -> Result<Collection>;

    /// Fetch a playlist and its tracks.
    async fn get_playlist(&self, link: &str) -> Result<Collection>;
}

/// What a query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Song(Track),
    Album(Collection),
    Playlist(Collection),
    Search(Vec<Track>),
}

impl Lookup {
    pub fn kind(&self) -> QueryKind {
        match self {
            Lookup::Song(_) => QueryKind::Song,
            Lookup::Album(_) => QueryKind::Album,
            Lookup::Playlist(_) => QueryKind::Playlist,
            Lookup::Search(_) => QueryKind::Search,
        }
    }
}

/// Classify `query` and run the matching extractor.
///
/// Dispatch order is song, album, playlist, then search. A link that matched a
/// shape is never retried as a search, even when its extractor finds nothing.
pub async fn dispatch(extractor: &dyn StorefrontExtractor, query: &str) -> Result<Lookup> {
    let query = query.trim();
    let kind = classify(query)
        .ok_or_else(|| AppleMusicError::InvalidQuery(query.to_string()))?;
    log::debug!("Dispatching {kind} query: {query}");

    match kind {
        QueryKind::Song => extractor.get_song(query).await.map(Lookup::Song),
        QueryKind::Album => extractor.get_album(query).await.map(Lookup::Album),
        QueryKind::Playlist => extractor.get_playlist(query).await.map(Lookup::Playlist),
        QueryKind::Search => extractor.search(query).await.map(Lookup::Search),
    }
}

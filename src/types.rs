//! Data types for Apple Music metadata.
//!
//! These are plain value objects: every extractor call builds fresh ones and hands
//! them to the caller. Missing upstream data never leaves a field empty, it falls back
//! to one of the constants below instead.

use serde::{Deserialize, Serialize};

pub use crate::duration::DEFAULT_DURATION;

/// Artwork used when a page exposes none.
pub const FALLBACK_THUMBNAIL: &str = "https://music.apple.com/assets/favicon/favicon-180.png";

/// Artist label used when a page exposes none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A single track as parsed from a storefront page.
///
/// # Examples
///
/// ```rust
/// use applemusic_meta::Track;
///
/// let track = Track {
///     id: "1440857781".to_string(),
///     title: "Paranoid Android".to_string(),
///     artist: "Radiohead".to_string(),
///     duration: "6:27".to_string(),
///     thumbnail: "https://is1-ssl.mzstatic.com/image/thumb/cover/600x600bb.jpg".to_string(),
///     url: "https://music.apple.com/us/song/paranoid-android/1440857781".to_string(),
/// };
///
/// assert_eq!(format!("{track}"), "Radiohead - Paranoid Android (6:27)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Storefront content identifier
    pub id: String,
    /// The track title
    pub title: String,
    /// The performing artist, or [`UNKNOWN_ARTIST`]
    pub artist: String,
    /// Display duration such as `3:21` or `1:02:03`, or [`DEFAULT_DURATION`]
    pub duration: String,
    /// Artwork URL, or [`FALLBACK_THUMBNAIL`]
    pub thumbnail: String,
    /// Link to the track on the storefront
    pub url: String,
}

/// Whether a [`Collection`] was parsed from an album page or a playlist page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Album,
    Playlist,
}

/// An album or playlist with its tracks in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub kind: CollectionKind,
    /// Storefront identifier, when the page exposes one
    pub id: Option<String>,
    pub title: String,
    /// Free-text description; playlists usually have one, albums rarely do
    pub description: Option<String>,
    /// Artwork URL, or [`FALLBACK_THUMBNAIL`]
    pub thumbnail: String,
    /// Canonical link to the collection
    pub url: Option<String>,
    /// The album artist for albums, the curator for playlists
    pub artist: Option<String>,
    pub tracks: Vec<Track>,
}

impl Collection {
    /// The description, or the title when the page has no description.
    pub fn description_or_title(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.title)
    }

    /// The album artist or curator, or [`UNKNOWN_ARTIST`].
    pub fn artist_or_unknown(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.title, self.duration)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.artist {
            Some(artist) => write!(f, "{} - {}", artist, self.title)?,
            None => write!(f, "{}", self.title)?,
        }
        write!(f, " [{} tracks]", self.tracks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(description: Option<&str>, artist: Option<&str>) -> Collection {
        Collection {
            kind: CollectionKind::Playlist,
            id: Some("pl.u-abc".to_string()),
            title: "Late Night".to_string(),
            description: description.map(str::to_string),
            thumbnail: FALLBACK_THUMBNAIL.to_string(),
            url: None,
            artist: artist.map(str::to_string),
            tracks: Vec::new(),
        }
    }

    #[test]
    fn test_description_falls_back_to_title() {
        assert_eq!(collection(None, None).description_or_title(), "Late Night");
        assert_eq!(
            collection(Some("Quiet songs"), None).description_or_title(),
            "Quiet songs"
        );
    }

    #[test]
    fn test_display_implementations() {
        assert_eq!(
            format!("{}", collection(None, Some("Apple Music"))),
            "Apple Music - Late Night [0 tracks]"
        );
        assert_eq!(format!("{}", collection(None, None)), "Late Night [0 tracks]");
        assert_eq!(collection(None, None).artist_or_unknown(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_collection_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CollectionKind::Album).unwrap();
        assert_eq!(json, "\"album\"");
    }
}

//! Recognition of the input shapes the extractor accepts.
//!
//! A query is either one of three storefront links (song, album, playlist) or a
//! free-text search term. Anything that looks like a URL but is none of the
//! three links is rejected rather than searched for.

use http_types::Url;
use regex::Regex;
use std::sync::LazyLock;

static SONG_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://(?:geo\.)?music\.apple\.com/[a-z]{2}/",
        r"(?:song/[^/?#]+/\d+|album/[^/?#]+/\d+\?(?:[^#]*&)?i=\d+)",
        r"(?:[?&][^#]*)?$",
    ))
    .unwrap()
});

static ALBUM_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:geo\.)?music\.apple\.com/[a-z]{2}/album/[^/?#]+/\d+(?:\?[^#]*)?$")
        .unwrap()
});

static PLAYLIST_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://(?:geo\.)?music\.apple\.com/[a-z]{2}/playlist/[^/?#]+/",
        r"pl\.(?:(?:u|pm)-)?[A-Za-z0-9]+(?:\?[^#]*)?$",
    ))
    .unwrap()
});

/// The four mutually exclusive input shapes, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Song,
    Album,
    Playlist,
    Search,
}

impl QueryKind {
    /// Identifier the host uses to tag which kind of lookup produced a result.
    pub fn query_type(&self) -> &'static str {
        match self {
            QueryKind::Song => "appleMusicSong",
            QueryKind::Album => "appleMusicAlbum",
            QueryKind::Playlist => "appleMusicPlaylist",
            QueryKind::Search => "appleMusicSearch",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_type())
    }
}

pub fn is_song_link(query: &str) -> bool {
    SONG_LINK.is_match(query)
}

/// Album links carry no `i=` track index; those are songs.
pub fn is_album_link(query: &str) -> bool {
    ALBUM_LINK.is_match(query) && !is_song_link(query)
}

pub fn is_playlist_link(query: &str) -> bool {
    PLAYLIST_LINK.is_match(query)
}

/// True when the string parses as an absolute http(s) URL with a host.
pub fn is_url(query: &str) -> bool {
    Url::parse(query)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Classify a query, or `None` when it is a URL that matches no link shape.
pub fn classify(query: &str) -> Option<QueryKind> {
    let query = query.trim();
    if is_song_link(query) {
        Some(QueryKind::Song)
    } else if is_album_link(query) {
        Some(QueryKind::Album)
    } else if is_playlist_link(query) {
        Some(QueryKind::Playlist)
    } else if is_url(query) {
        log::debug!("Rejecting unrecognized link: {query}");
        None
    } else {
        Some(QueryKind::Search)
    }
}

/// Whether a string is acceptable input at all.
pub fn validate(query: &str) -> bool {
    classify(query).is_some()
}

/// Slug and identifier recovered from a song link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongLink {
    pub slug: String,
    pub id: String,
}

/// Recover slug and track identifier from `/song/<slug>/<id>` or
/// `/album/<slug>/<albumId>?i=<trackId>` links.
pub fn parse_song_link(link: &str) -> Option<SongLink> {
    let url = Url::parse(link.trim()).ok()?;
    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();

    let kind_index = segments
        .iter()
        .position(|segment| *segment == "song" || *segment == "album")?;
    let slug = segments.get(kind_index + 1).copied().unwrap_or_default();

    let id = if segments[kind_index] == "album" {
        url.query_pairs()
            .find(|(key, _)| key == "i")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    } else {
        segments
            .get(kind_index + 2)
            .map(|s| s.to_string())
            .unwrap_or_default()
    };

    if slug.is_empty() || id.is_empty() {
        return None;
    }

    Some(SongLink {
        slug: slug.to_string(),
        id,
    })
}

/// The link without its query string.
pub fn strip_query(link: &str) -> &str {
    link.split('?').next().unwrap_or(link)
}

/// Everything after the final `/`, taken literally.
pub fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

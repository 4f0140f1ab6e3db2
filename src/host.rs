//! The hosting playback framework's view of extraction results.
//!
//! The host queues [`HostTrack`]s and groups them under [`HostPlaylist`]s. Each one
//! keeps the record it was built from so the host can hand it back when it asks
//! for a stream.

use crate::classify::QueryKind;
use crate::types::{Collection, CollectionKind, Track};
use serde::Serialize;

/// Source tag the host uses to tell which extractor produced a track.
pub const SOURCE_NAME: &str = "apple_music";

/// Who is asking, as far as the host is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchContext {
    pub requested_by: String,
}

impl SearchContext {
    pub fn new(requested_by: impl Into<String>) -> Self {
        Self {
            requested_by: requested_by.into(),
        }
    }
}

/// Back-reference from a track to the album or playlist it was loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistRef {
    pub id: Option<String>,
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostTrack {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub duration: String,
    pub source: &'static str,
    pub query_type: &'static str,
    pub requested_by: String,
    pub playlist: Option<PlaylistRef>,
    /// The record this track was built from
    pub metadata: Track,
}

impl HostTrack {
    pub fn from_record(
        track: Track,
        kind: QueryKind,
        context: &SearchContext,
        playlist: Option<PlaylistRef>,
    ) -> Self {
        Self {
            title: track.title.clone(),
            author: track.artist.clone(),
            description: format!("{} by {}", track.title, track.artist),
            url: track.url.clone(),
            thumbnail: track.thumbnail.clone(),
            duration: track.duration.clone(),
            source: SOURCE_NAME,
            query_type: kind.query_type(),
            requested_by: context.requested_by.clone(),
            playlist,
            metadata: track,
        }
    }

    /// Duration in milliseconds, or 0 when the display string is not `[h:]m:ss`
    /// or does not fit in a `u64`.
    pub fn duration_ms(&self) -> u64 {
        self.duration
            .split(':')
            .try_fold(0u64, |acc, part| {
                let value = part.parse::<u64>().ok()?;
                acc.checked_mul(60)?.checked_add(value)
            })
            .and_then(|seconds| seconds.checked_mul(1000))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPlaylist {
    pub kind: CollectionKind,
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub url: Option<String>,
    pub author: String,
    pub source: &'static str,
    pub tracks: Vec<HostTrack>,
    /// The record this playlist was built from
    pub metadata: Collection,
}

impl HostPlaylist {
    pub fn from_record(collection: Collection, kind: QueryKind, context: &SearchContext) -> Self {
        let reference = PlaylistRef {
            id: collection.id.clone(),
            title: collection.title.clone(),
            url: collection.url.clone(),
        };

        let tracks = collection
            .tracks
            .iter()
            .cloned()
            .map(|track| HostTrack::from_record(track, kind, context, Some(reference.clone())))
            .collect();

        Self {
            kind: collection.kind,
            id: collection.id.clone(),
            title: collection.title.clone(),
            description: collection.description_or_title().to_string(),
            thumbnail: collection.thumbnail.clone(),
            url: collection.url.clone(),
            author: collection.artist_or_unknown().to_string(),
            source: SOURCE_NAME,
            tracks,
            metadata: collection,
        }
    }
}

/// What the facade hands back for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractorResponse {
    pub playlist: Option<HostPlaylist>,
    pub tracks: Vec<HostTrack>,
}

impl ExtractorResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tracks(tracks: Vec<HostTrack>) -> Self {
        Self {
            playlist: None,
            tracks,
        }
    }

    pub fn playlist(playlist: HostPlaylist) -> Self {
        Self {
            tracks: playlist.tracks.clone(),
            playlist: Some(playlist),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_none() && self.tracks.is_empty()
    }
}

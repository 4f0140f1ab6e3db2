//! Serde models for the structured data embedded in storefront pages.
//!
//! Two kinds of payload are used: the `serialized-server-data` blob the web app
//! hydrates from (search results, playlist track lists) and the schema.org JSON-LD
//! blocks on album and playlist pages. Every field is optional; the parsers decide
//! what a missing field falls back to.

use serde::Deserialize;
use serde_json::Value;

/// One entry of the top-level `serialized-server-data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerData {
    #[serde(default)]
    pub data: ServerDataBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerDataBody {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A shelf on the page. Items stay untyped so one odd item cannot sink the section.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "itemKind", default)]
    pub item_kind: Option<String>,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl Section {
    pub fn is_track_lockup(&self) -> bool {
        self.item_kind.as_deref() == Some("trackLockup")
    }

    pub fn is_track_list(&self) -> bool {
        self.id.as_deref().is_some_and(|id| id.contains("track-list"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    #[serde(default)]
    pub title: Option<String>,
    /// Either a preformatted string or a number, depending on the shelf
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub content_descriptor: Option<ContentDescriptor>,
    #[serde(default)]
    pub artwork: Option<Artwork>,
    #[serde(default)]
    pub subtitle_links: Vec<SubtitleLink>,
}

impl SectionItem {
    pub fn first_subtitle(&self) -> Option<&str> {
        self.subtitle_links
            .first()
            .and_then(|link| link.title.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDescriptor {
    #[serde(default)]
    pub identifiers: Option<Identifiers>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identifiers {
    /// Sometimes a string, sometimes a number
    #[serde(rename = "storeAdamID", default)]
    pub store_adam_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub dictionary: Option<ArtworkDictionary>,
}

/// Artwork template. Dimensions show up as integers or floats (`1400.0`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkDictionary {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
}

impl ArtworkDictionary {
    pub fn template(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn width(&self) -> Option<u32> {
        self.width.as_ref().and_then(value_to_dimension)
    }

    pub fn height(&self) -> Option<u32> {
        self.height.as_ref().and_then(value_to_dimension)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleLink {
    #[serde(default)]
    pub title: Option<String>,
}

/// schema.org `MusicAlbum` / `MusicPlaylist` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionLd {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "byArtist", default)]
    pub by_artist: Option<OneOrMany<PersonLd>>,
    #[serde(default)]
    pub author: Option<OneOrMany<PersonLd>>,
    #[serde(default)]
    pub tracks: Vec<TrackLd>,
    #[serde(default)]
    pub track: Vec<TrackLd>,
}

impl CollectionLd {
    /// Name of the first listed artist, else the first author.
    pub fn author_name(&self) -> Option<&str> {
        [&self.by_artist, &self.author]
            .into_iter()
            .find_map(|people| {
                people
                    .as_ref()
                    .and_then(OneOrMany::first)
                    .and_then(|person| person.name.as_deref())
                    .filter(|name| !name.trim().is_empty())
            })
    }

    /// Track entries under `tracks`, or under `track` when that list is empty.
    pub fn tracks(&self) -> &[TrackLd] {
        if self.tracks.is_empty() {
            &self.track
        } else {
            &self.tracks
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonLd {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackLd {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// JSON-LD allows a single object wherever a list is expected.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.first(),
        }
    }
}

/// Render a JSON scalar as display text; strings are taken verbatim.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a pixel dimension given as an integer or a whole float.
pub fn value_to_dimension(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

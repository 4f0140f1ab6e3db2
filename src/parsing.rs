//! HTML parsing utilities for Apple Music storefront pages.
//!
//! This module contains all the logic for turning a fetched document into
//! [`Track`] and [`Collection`] records. The functions are pure: they take a parsed
//! document plus whatever the caller already knows about the link, and never touch
//! the network.

use crate::classify::{last_path_segment, SongLink};
use crate::duration::{normalize, DEFAULT_DURATION};
use crate::image::make_image;
use crate::structured::{value_to_text, CollectionLd, SectionItem, ServerData};
use crate::types::{Collection, CollectionKind, Track, FALLBACK_THUMBNAIL, UNKNOWN_ARTIST};
use crate::{AppleMusicError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Element id of the web app's hydration payload.
pub const SERVER_DATA_ID: &str = "serialized-server-data";
/// Element id of the JSON-LD block on album pages.
pub const ALBUM_LD_ID: &str = "schema:music-album";
/// Element id of the JSON-LD block on playlist pages.
pub const PLAYLIST_LD_ID: &str = "schema:music-playlist";

/// Title used when neither the page nor the link carries one.
pub const UNTITLED: &str = "Untitled";

/// Artwork size requested when a search result omits its dimensions.
const DEFAULT_ARTWORK_SIZE: u32 = 600;

static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static ARTIST_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".headings__subtitles a").unwrap());

static DESCRIPTION_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Duration:\s*([0-9]+(?::[0-9]{1,2})+)").unwrap());
static ARTIST_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/artist/([^/?#]+)(?:/|$)").unwrap());

/// All `<meta>` tags of a document keyed by their `name` or `property`.
///
/// The first occurrence of a key wins, matching what a browser's
/// `querySelector` would return.
#[derive(Debug, Clone, Default)]
pub struct MetaTags {
    tags: HashMap<String, String>,
}

impl MetaTags {
    pub fn from_document(document: &Html) -> Self {
        let mut tags = HashMap::new();
        for meta in document.select(&META_SELECTOR) {
            let element = meta.value();
            let Some(key) = element.attr("name").or_else(|| element.attr("property")) else {
                continue;
            };
            let Some(content) = element.attr("content") else {
                continue;
            };
            tags.entry(key.to_string())
                .or_insert_with(|| content.trim().to_string());
        }
        Self { tags }
    }

    /// Content of the tag, ignoring empty values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Content of the first present tag among `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Parser for the four storefront page layouts.
///
/// Stateless; parsing the same document twice yields identical records.
#[derive(Debug, Clone, Default)]
pub struct StorefrontParser;

impl StorefrontParser {
    /// Create a new parser instance.
    pub fn new() -> Self {
        Self
    }

    /// Text content of the `<script>` element with the given id, if any.
    pub fn script_by_id(&self, document: &Html, id: &str) -> Option<String> {
        let selector = Selector::parse(&format!("script[id=\"{id}\"]")).ok()?;
        document
            .select(&selector)
            .next()
            .map(|script| script.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
    }

    /// Decode the `serialized-server-data` payload.
    pub fn parse_server_data(&self, document: &Html) -> Result<Vec<ServerData>> {
        let payload = self.script_by_id(document, SERVER_DATA_ID).ok_or_else(|| {
            AppleMusicError::NotFound(format!("no #{SERVER_DATA_ID} payload on page"))
        })?;
        Ok(serde_json::from_str(&payload)?)
    }

    /// Decode a JSON-LD block; `Ok(None)` when the page has none.
    pub fn parse_json_ld(&self, document: &Html, id: &str) -> Result<Option<CollectionLd>> {
        match self.script_by_id(document, id) {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => {
                log::debug!("No #{id} JSON-LD block on page");
                Ok(None)
            }
        }
    }

    /// Parse the track shelf of a search results page.
    pub fn parse_search_page(&self, document: &Html) -> Result<Vec<Track>> {
        let server_data = self.parse_server_data(document)?;
        let section = server_data
            .into_iter()
            .next()
            .and_then(|entry| {
                entry
                    .data
                    .sections
                    .into_iter()
                    .find(|section| section.is_track_lockup())
            })
            .ok_or_else(|| AppleMusicError::NotFound("no track section in results".to_string()))?;

        let mut tracks = Vec::with_capacity(section.items.len());
        for raw in section.items {
            match serde_json::from_value::<SectionItem>(raw) {
                Ok(item) => tracks.push(self.search_item_to_track(&item)),
                Err(e) => log::debug!("Skipping malformed search item: {e}"),
            }
        }

        log::debug!("Parsed {} search results", tracks.len());
        Ok(tracks)
    }

    fn search_item_to_track(&self, item: &SectionItem) -> Track {
        let descriptor = item.content_descriptor.as_ref();

        let id = descriptor
            .and_then(|d| d.identifiers.as_ref())
            .and_then(|i| i.store_adam_id.as_ref())
            .and_then(value_to_text)
            .unwrap_or_default();

        let thumbnail = item
            .artwork
            .as_ref()
            .and_then(|artwork| artwork.dictionary.as_ref())
            .and_then(|dict| {
                dict.template().map(|template| {
                    make_image(
                        template,
                        dict.width().unwrap_or(DEFAULT_ARTWORK_SIZE),
                        dict.height().unwrap_or(DEFAULT_ARTWORK_SIZE),
                        None,
                    )
                })
            })
            .unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());

        Track {
            id,
            title: item.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            artist: item.first_subtitle().unwrap_or(UNKNOWN_ARTIST).to_string(),
            duration: item
                .duration
                .as_ref()
                .and_then(value_to_text)
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            thumbnail,
            url: descriptor
                .and_then(|d| d.url.clone())
                .unwrap_or_default(),
        }
    }

    /// Parse a song page fetched from `url`, which was built from `link`.
    pub fn parse_song_page(&self, document: &Html, link: &SongLink, url: &str) -> Result<Track> {
        let meta = MetaTags::from_document(document);
        log::debug!("Song page has {} meta tags", meta.len());

        let title = meta
            .get("apple:title")
            .map(str::to_string)
            .or_else(|| self.document_title(document))
            .unwrap_or_else(|| link.slug.clone());

        let id = meta
            .get("apple:content_id")
            .map(str::to_string)
            .unwrap_or_else(|| link.id.clone());

        let duration = match meta.get("music:song:duration") {
            Some(duration) => normalize(duration),
            None => meta
                .get("description")
                .and_then(duration_from_description)
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        };

        let thumbnail = meta
            .first_of(&["og:image", "twitter:image"])
            .unwrap_or(FALLBACK_THUMBNAIL)
            .to_string();

        let artist = meta
            .get("music:musician")
            .and_then(artist_from_profile_url)
            .or_else(|| self.artist_from_headings(document))
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Ok(Track {
            id,
            title,
            artist,
            duration,
            thumbnail,
            url: url.to_string(),
        })
    }

    /// Parse an album page fetched from `url` (already stripped of its query).
    pub fn parse_album_page(&self, document: &Html, url: &str) -> Result<Collection> {
        let meta = MetaTags::from_document(document);

        let title = meta
            .first_of(&["apple:title", "og:title"])
            .map(str::to_string)
            .or_else(|| self.document_title(document))
            .unwrap_or_else(|| UNTITLED.to_string());
        let thumbnail = meta
            .get("og:image")
            .unwrap_or(FALLBACK_THUMBNAIL)
            .to_string();

        let mut album = Collection {
            kind: CollectionKind::Album,
            id: Some(last_path_segment(url).to_string()),
            title,
            description: None,
            thumbnail,
            url: Some(url.to_string()),
            artist: None,
            tracks: Vec::new(),
        };

        let Some(ld) = self.parse_json_ld(document, ALBUM_LD_ID)? else {
            return Ok(album);
        };

        let artist = ld.author_name().map(str::to_string);
        let track_artist = artist.as_deref().unwrap_or(UNKNOWN_ARTIST);
        album.tracks = ld
            .tracks()
            .iter()
            .map(|entry| {
                let track_url = entry.url.clone().unwrap_or_default();
                Track {
                    id: last_path_segment(&track_url).to_string(),
                    title: entry.name.clone().unwrap_or_else(|| UNTITLED.to_string()),
                    artist: track_artist.to_string(),
                    duration: entry
                        .duration
                        .as_deref()
                        .map(normalize)
                        .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
                    thumbnail: album.thumbnail.clone(),
                    url: track_url,
                }
            })
            .collect();
        album.description = ld.description.filter(|d| !d.trim().is_empty());
        album.artist = artist;

        log::debug!("Parsed album '{}' with {} tracks", album.title, album.tracks.len());
        Ok(album)
    }

    /// Parse a playlist page fetched from `url`.
    pub fn parse_playlist_page(&self, document: &Html, url: &str) -> Result<Collection> {
        let meta = MetaTags::from_document(document);

        let title = meta
            .first_of(&["apple:title", "og:title"])
            .map(str::to_string)
            .or_else(|| self.document_title(document))
            .unwrap_or_else(|| UNTITLED.to_string());
        let description = meta
            .first_of(&["apple:description", "og:description"])
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());
        let thumbnail = meta
            .get("og:image")
            .unwrap_or(FALLBACK_THUMBNAIL)
            .to_string();

        let listed_artists = self.playlist_track_artists(document);

        let mut playlist = Collection {
            kind: CollectionKind::Playlist,
            id: Some(last_path_segment(url).to_string()),
            title,
            description: Some(description),
            thumbnail,
            url: Some(url.to_string()),
            artist: None,
            tracks: Vec::new(),
        };

        let Some(ld) = self.parse_json_ld(document, PLAYLIST_LD_ID)? else {
            return Ok(playlist);
        };

        let author = ld.author_name().map(str::to_string);
        // Matched by position: the hydration payload and JSON-LD are assumed to list
        // tracks in the same order. Nothing on the page lets us pair them by id.
        playlist.tracks = ld
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let track_url = entry.url.clone().unwrap_or_default();
                let artist = listed_artists
                    .get(index)
                    .cloned()
                    .flatten()
                    .or_else(|| author.clone())
                    .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
                Track {
                    id: last_path_segment(&track_url).to_string(),
                    title: entry.name.clone().unwrap_or_else(|| UNTITLED.to_string()),
                    artist,
                    duration: entry
                        .duration
                        .as_deref()
                        .map(normalize)
                        .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
                    thumbnail: FALLBACK_THUMBNAIL.to_string(),
                    url: track_url,
                }
            })
            .collect();
        playlist.artist = author;

        log::debug!(
            "Parsed playlist '{}' with {} tracks ({} artists recovered)",
            playlist.title,
            playlist.tracks.len(),
            listed_artists.len()
        );
        Ok(playlist)
    }

    /// Best-effort per-track artist names from the playlist's track-list shelf.
    ///
    /// Positions are preserved: an item without an artist yields `None` so later
    /// entries still line up with the JSON-LD track list. Any failure gives an
    /// empty list.
    pub fn playlist_track_artists(&self, document: &Html) -> Vec<Option<String>> {
        let server_data = match self.parse_server_data(document) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("No playlist artist data: {e}");
                return Vec::new();
            }
        };

        server_data
            .iter()
            .flat_map(|entry| entry.data.sections.iter())
            .filter(|section| section.is_track_list())
            .flat_map(|section| section.items.iter())
            .map(|raw| {
                serde_json::from_value::<SectionItem>(raw.clone())
                    .ok()
                    .and_then(|item| {
                        item.artist_name
                            .clone()
                            .or_else(|| item.first_subtitle().map(str::to_string))
                    })
                    .filter(|name| !name.trim().is_empty())
            })
            .collect()
    }

    fn document_title(&self, document: &Html) -> Option<String> {
        document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    fn artist_from_headings(&self, document: &Html) -> Option<String> {
        document
            .select(&ARTIST_LINK_SELECTOR)
            .next()
            .map(|link| link.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

/// Pull the `m:ss` value out of a "... Duration: 3:45 ..." description.
pub fn duration_from_description(description: &str) -> Option<String> {
    DESCRIPTION_DURATION
        .captures(description)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Turn `https://music.apple.com/us/artist/daft-punk/5468295` into `Daft Punk`.
pub fn artist_from_profile_url(url: &str) -> Option<String> {
    let slug = ARTIST_PROFILE.captures(url)?.get(1)?.as_str();
    let slug = urlencoding::decode(slug)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| slug.to_string());

    let name = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

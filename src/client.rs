use crate::classify::{parse_song_link, strip_query};
use crate::fetcher::PageFetcher;
use crate::parsing::StorefrontParser;
use crate::r#trait::{dispatch, Lookup, StorefrontExtractor};
use crate::{AppleMusicError, ClientConfig, Collection, Result, Track};
use async_trait::async_trait;
use http_client::HttpClient;
use scraper::Html;

/// Client for extracting metadata from the Apple Music web storefront.
///
/// This client fetches public storefront pages and parses the structured data
/// embedded in them. It holds no state between calls: every method issues its
/// own request and builds fresh records.
///
/// # Examples
///
/// ```rust,no_run
/// use applemusic_meta::{AppleMusicClient, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = AppleMusicClient::new(Box::new(http_client));
///
///     for track in client.search("one more time").await? {
///         println!("{track}");
///     }
///
///     Ok(())
/// }
/// ```
pub struct AppleMusicClient {
    fetcher: PageFetcher,
    config: ClientConfig,
    parser: StorefrontParser,
}

impl AppleMusicClient {
    /// Create a new [`AppleMusicClient`] with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    /// Create a new [`AppleMusicClient`] with a custom configuration.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation
    /// * `config` - Storefront host, region and user agent
    pub fn with_config(client: Box<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            fetcher: PageFetcher::new(client, config.user_agent.clone()),
            config,
            parser: StorefrontParser::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search the storefront for tracks matching a free-text term.
    ///
    /// Only the first results page is read.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let url = self.config.search_url(query);
        let document = self.fetch(&url).await?;
        self.parser.parse_search_page(&document)
    }

    /// Fetch a song from a `/song/<slug>/<id>` or `/album/<slug>/<id>?i=<trackId>` link.
    ///
    /// The page is always requested through its canonical `/song/` URL.
    pub async fn get_song(&self, link: &str) -> Result<Track> {
        let song = parse_song_link(link).ok_or_else(|| {
            AppleMusicError::InvalidQuery(format!("no slug and id in song link {link}"))
        })?;
        let url = self.config.song_url(&song.slug, &song.id);
        let document = self.fetch(&url).await?;
        self.parser.parse_song_page(&document, &song, &url)
    }

    /// Fetch an album page and its track list.
    pub async fn get_album(&self, link: &str) -> Result<Collection> {
        let url = strip_query(link.trim());
        let document = self.fetch(url).await?;
        self.parser.parse_album_page(&document, url)
    }

    /// Fetch a playlist page and its track list.
    pub async fn get_playlist(&self, link: &str) -> Result<Collection> {
        let url = link.trim();
        let document = self.fetch(url).await?;
        self.parser.parse_playlist_page(&document, url)
    }

    /// Classify `query` and run whichever extractor matches it.
    pub async fn extract(&self, query: &str) -> Result<Lookup> {
        dispatch(self, query).await
    }

    async fn fetch(&self, url: &str) -> Result<Html> {
        self.fetcher
            .fetch(url)
            .await
            .ok_or_else(|| AppleMusicError::Http(format!("no document for {url}")))
    }
}

#[async_trait(?Send)]
impl StorefrontExtractor for AppleMusicClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        AppleMusicClient::search(self, query).await
    }

    async fn get_song(&self, link: &str) -> Result<Track> {
        AppleMusicClient::get_song(self, link).await
    }

    async fn get_album(&self, link: &str) -> Result<Collection> {
        AppleMusicClient::get_album(self, link).await
    }

    async fn get_playlist(&self, link: &str) -> Result<Collection> {
        AppleMusicClient::get_playlist(self, link).await
    }
}

impl std::fmt::Debug for AppleMusicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleMusicClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

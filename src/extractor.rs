//! The facade the hosting framework talks to.

use crate::classify::validate;
use crate::host::{ExtractorResponse, HostPlaylist, HostTrack, SearchContext};
use crate::r#trait::{dispatch, Lookup, StorefrontExtractor};
use crate::stream::{Bridge, BridgeStream, CustomStream, StreamSource, StreamStrategy};
use crate::{AppleMusicError, Result};

/// Options fixed at activation time.
#[derive(Default)]
pub struct ExtractorOptions {
    /// Produce streams with this function instead of bridging
    pub create_stream: Option<CustomStream>,
}

/// Facade that classifies queries, runs the matching extractor and maps the
/// records into host objects.
///
/// Metadata lookups never fail: anything that goes wrong while extracting comes
/// back as an empty [`ExtractorResponse`]. Only [`stream`](Self::stream) can
/// return an error.
///
/// # Examples
///
/// ```rust,no_run
/// use applemusic_meta::{AppleMusicClient, AppleMusicExtractor, ExtractorOptions, SearchContext};
/// use applemusic_meta::stream::{Bridge, StreamSource};
/// use applemusic_meta::host::HostTrack;
///
/// struct NoBridge;
///
/// #[async_trait::async_trait(?Send)]
/// impl Bridge for NoBridge {
///     async fn bridge(&self, _track: &HostTrack) -> Option<StreamSource> {
///         None
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let client = AppleMusicClient::new(Box::new(http_client::native::NativeClient::new()));
/// let extractor = AppleMusicExtractor::activate(
///     Box::new(client),
///     Box::new(NoBridge),
///     ExtractorOptions::default(),
/// );
///
/// let response = extractor
///     .handle("https://music.apple.com/us/album/discovery/697194953", &SearchContext::new("me"))
///     .await;
/// if let Some(album) = response.playlist {
///     println!("{} ({} tracks)", album.title, album.tracks.len());
/// }
/// # });
/// ```
pub struct AppleMusicExtractor {
    extractor: Box<dyn StorefrontExtractor>,
    streamer: Box<dyn StreamStrategy>,
}

impl AppleMusicExtractor {
    /// Activate the facade, choosing the stream strategy once.
    ///
    /// With `options.create_stream` set, streams come from that function and the
    /// bridge is never consulted.
    pub fn activate(
        extractor: Box<dyn StorefrontExtractor>,
        bridge: Box<dyn Bridge>,
        options: ExtractorOptions,
    ) -> Self {
        let streamer: Box<dyn StreamStrategy> = match options.create_stream {
            Some(custom) => {
                log::debug!("Using custom stream function");
                Box::new(custom)
            }
            None => Box::new(BridgeStream::new(bridge)),
        };
        Self::with_strategy(extractor, streamer)
    }

    pub fn with_strategy(
        extractor: Box<dyn StorefrontExtractor>,
        streamer: Box<dyn StreamStrategy>,
    ) -> Self {
        Self {
            extractor,
            streamer,
        }
    }

    /// Whether `query` is something this extractor can handle.
    pub fn validate(&self, query: &str) -> bool {
        validate(query.trim())
    }

    /// Resolve `query` into host tracks, or an empty response.
    pub async fn handle(&self, query: &str, context: &SearchContext) -> ExtractorResponse {
        let lookup = match dispatch(self.extractor.as_ref(), query).await {
            Ok(lookup) => lookup,
            Err(AppleMusicError::InvalidQuery(_)) => {
                log::debug!("Ignoring invalid query: {query}");
                return ExtractorResponse::empty();
            }
            Err(e) => {
                log::debug!("No result for {query}: {e}");
                return ExtractorResponse::empty();
            }
        };

        let kind = lookup.kind();
        match lookup {
            Lookup::Song(track) => {
                ExtractorResponse::tracks(vec![HostTrack::from_record(track, kind, context, None)])
            }
            Lookup::Album(collection) | Lookup::Playlist(collection) => {
                ExtractorResponse::playlist(HostPlaylist::from_record(collection, kind, context))
            }
            Lookup::Search(tracks) => ExtractorResponse::tracks(
                tracks
                    .into_iter()
                    .map(|track| HostTrack::from_record(track, kind, context, None))
                    .collect(),
            ),
        }
    }

    /// Produce a playable source for a track previously returned by [`handle`](Self::handle).
    pub async fn stream(&self, track: &HostTrack) -> Result<StreamSource> {
        self.streamer.stream(self, track).await
    }

    /// The underlying storefront extractor.
    pub fn extractor(&self) -> &dyn StorefrontExtractor {
        self.extractor.as_ref()
    }
}

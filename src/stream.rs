//! Stream acquisition strategies.
//!
//! This crate never decodes audio. When the host wants to play a track it asks the
//! facade for a stream, and the facade delegates to one of two strategies chosen at
//! activation: a caller supplied function, or a [`Bridge`] that finds an equivalent
//! track on another provider.

use crate::host::HostTrack;
use crate::{AppleMusicError, AppleMusicExtractor, Result, Track};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::io::AsyncRead;
use std::future::Future;

/// A playable source: either a byte stream or a URL the host can open itself.
pub enum StreamSource {
    Url(String),
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl StreamSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            StreamSource::Url(url) => Some(url),
            StreamSource::Stream(_) => None,
        }
    }
}

impl std::fmt::Debug for StreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            StreamSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<String> for StreamSource {
    fn from(url: String) -> Self {
        StreamSource::Url(url)
    }
}

/// Strategy for turning a host track into a playable source.
#[async_trait(?Send)]
pub trait StreamStrategy {
    async fn stream(&self, extractor: &AppleMusicExtractor, track: &HostTrack)
        -> Result<StreamSource>;
}

/// External collaborator that looks up an equivalent playable track elsewhere.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait Bridge {
    /// Find a playable source for `track`, or `None` if no provider has it.
    async fn bridge(&self, track: &HostTrack) -> Option<StreamSource>;
}

type StreamFn =
    Box<dyn Fn(&AppleMusicExtractor, &str, &Track) -> LocalBoxFuture<'static, Result<StreamSource>>>;

/// Streams through a caller supplied function of `(extractor, url, record)`.
///
/// # Examples
///
/// ```rust
/// use applemusic_meta::stream::{CustomStream, StreamSource};
///
/// let streamer = CustomStream::new(|_extractor, url, _track| {
///     let url = format!("https://proxy.example/play?src={}", urlencoding::encode(url));
///     async move { Ok(StreamSource::Url(url)) }
/// });
/// # let _ = streamer;
/// ```
pub struct CustomStream {
    create: StreamFn,
}

impl CustomStream {
    pub fn new<F, Fut>(create: F) -> Self
    where
        F: Fn(&AppleMusicExtractor, &str, &Track) -> Fut + 'static,
        Fut: Future<Output = Result<StreamSource>> + 'static,
    {
        Self {
            create: Box::new(
                move |extractor: &AppleMusicExtractor,
                      url: &str,
                      track: &Track|
                      -> LocalBoxFuture<'static, Result<StreamSource>> {
                    Box::pin(create(extractor, url, track))
                },
            ),
        }
    }
}

#[async_trait(?Send)]
impl StreamStrategy for CustomStream {
    async fn stream(
        &self,
        extractor: &AppleMusicExtractor,
        track: &HostTrack,
    ) -> Result<StreamSource> {
        log::debug!("Creating custom stream for {}", track.url);
        (self.create)(extractor, &track.url, &track.metadata).await
    }
}

/// Streams by asking a [`Bridge`] for an equivalent track.
pub struct BridgeStream {
    bridge: Box<dyn Bridge>,
}

impl BridgeStream {
    pub fn new(bridge: Box<dyn Bridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait(?Send)]
impl StreamStrategy for BridgeStream {
    async fn stream(
        &self,
        _extractor: &AppleMusicExtractor,
        track: &HostTrack,
    ) -> Result<StreamSource> {
        log::debug!("Bridging {} - {}", track.author, track.title);
        self.bridge.bridge(track).await.ok_or_else(|| {
            AppleMusicError::Stream(format!(
                "could not find a bridge source for {} by {}",
                track.title, track.author
            ))
        })
    }
}

pub mod classify;
pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod headers;
pub mod host;
pub mod image;
pub mod parsing;
pub mod stream;
pub mod structured;
pub mod r#trait;
pub mod types;

pub use classify::QueryKind;
pub use client::AppleMusicClient;
pub use config::ClientConfig;
pub use error::AppleMusicError;
pub use extractor::{AppleMusicExtractor, ExtractorOptions};
pub use host::{ExtractorResponse, HostPlaylist, HostTrack, SearchContext};
pub use r#trait::{Lookup, StorefrontExtractor};
pub use types::{Collection, CollectionKind, Track, FALLBACK_THUMBNAIL, UNKNOWN_ARTIST};

#[cfg(feature = "mock")]
pub use r#trait::MockStorefrontExtractor;
#[cfg(feature = "mock")]
pub use stream::MockBridge;

// Re-export scraper types for testing
pub use scraper::Html;

pub type Result<T> = std::result::Result<T, AppleMusicError>;

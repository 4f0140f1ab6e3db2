#![allow(dead_code)]
use applemusic_meta::AppleMusicClient;
use http_client::{HttpClient, Request, Response};
use http_types::{Error, StatusCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SEARCH_HTML: &str = include_str!("../fixtures/search.html");
pub const SEARCH_NO_TRACKS_HTML: &str = include_str!("../fixtures/search_no_tracks.html");
pub const SONG_HTML: &str = include_str!("../fixtures/song.html");
pub const SONG_MINIMAL_HTML: &str = include_str!("../fixtures/song_minimal.html");
pub const ALBUM_HTML: &str = include_str!("../fixtures/album.html");
pub const ALBUM_NO_LD_HTML: &str = include_str!("../fixtures/album_no_ld.html");
pub const ALBUM_ARTIST_AND_AUTHOR_HTML: &str =
    include_str!("../fixtures/album_artist_and_author.html");
pub const ALBUM_BAD_LD_HTML: &str = include_str!("../fixtures/album_bad_ld.html");
pub const PLAYLIST_HTML: &str = include_str!("../fixtures/playlist.html");
pub const PLAYLIST_NO_LD_HTML: &str = include_str!("../fixtures/playlist_no_ld.html");

/// HTTP client that serves canned pages by exact URL.
///
/// Unknown URLs fail like a refused connection, so an empty fixture client is a
/// stand-in for the network being down.
#[derive(Debug, Clone, Default)]
pub struct FixtureClient {
    pages: HashMap<String, (StatusCode, String)>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), (StatusCode::Ok, body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: StatusCode, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), (status, body.to_string()));
        self
    }

    /// Shared log of every request sent through this client or its clones.
    pub fn request_log(&self) -> Arc<Mutex<Vec<Request>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait::async_trait]
impl HttpClient for FixtureClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url().to_string();
        self.requests.lock().unwrap().push(req);

        match self.pages.get(&url) {
            Some((status, body)) => {
                let mut response = Response::new(*status);
                response.set_body(body.as_str());
                Ok(response)
            }
            None => Err(Error::from_str(
                StatusCode::ServiceUnavailable,
                format!("connection refused: {url}"),
            )),
        }
    }
}

pub fn client_for(fixtures: FixtureClient) -> AppleMusicClient {
    AppleMusicClient::new(Box::new(fixtures))
}

pub fn requested_urls(log: &Arc<Mutex<Vec<Request>>>) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .map(|req| req.url().to_string())
        .collect()
}

use crate::headers::add_browser_headers;
use crate::{AppleMusicError, Result};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use scraper::Html;

/// Fetches storefront pages and parses them into documents.
///
/// The fetcher never fails loudly: transport errors, bad status codes and unreadable
/// bodies are logged and surface as `None`, which the extractors treat as
/// "no data available".
pub struct PageFetcher {
    client: Box<dyn HttpClient>,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(client: Box<dyn HttpClient>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// GET `url` and parse the body as an HTML document.
    pub async fn fetch(&self, url: &str) -> Option<Html> {
        match self.fetch_text(url).await {
            Ok(body) => Some(Html::parse_document(&body)),
            Err(e) => {
                log::warn!("Failed to fetch {url}: {e}");
                None
            }
        }
    }

    /// GET `url` and return the raw response body.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let parsed = url
            .parse::<Url>()
            .map_err(|e| AppleMusicError::Http(format!("invalid url {url}: {e}")))?;

        let mut request = Request::new(Method::Get, parsed);
        add_browser_headers(&mut request, &self.user_agent);

        log::debug!("GET {url}");
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| AppleMusicError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("GET {url} -> {status}");
        if !status.is_success() {
            return Err(AppleMusicError::Http(format!(
                "unexpected status {status} for {url}"
            )));
        }

        response
            .body_string()
            .await
            .map_err(|e| AppleMusicError::Http(e.to_string()))
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

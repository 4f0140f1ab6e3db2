use crate::headers::USER_AGENT;

/// Default storefront host.
pub const DEFAULT_BASE_URL: &str = "https://music.apple.com";

/// Default two-letter storefront region used when rebuilding canonical URLs.
pub const DEFAULT_STOREFRONT: &str = "us";

/// Connection settings for [`AppleMusicClient`](crate::AppleMusicClient).
///
/// # Examples
///
/// ```rust
/// use applemusic_meta::ClientConfig;
///
/// let config = ClientConfig::default().with_storefront("gb");
/// assert_eq!(config.search_url("daft punk"), "https://music.apple.com/gb/search?term=daft%20punk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the storefront, without a trailing slash
    pub base_url: String,
    /// Region segment placed after the host, e.g. `us`
    pub storefront: String,
    /// Value of the `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storefront: DEFAULT_STOREFRONT.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config from defaults overridden by environment variables.
    ///
    /// Reads `APPLEMUSIC_BASE_URL`, `APPLEMUSIC_STOREFRONT` and
    /// `APPLEMUSIC_USER_AGENT`; unset or empty variables keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base_url) = non_empty_env("APPLEMUSIC_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(storefront) = non_empty_env("APPLEMUSIC_STOREFRONT") {
            config = config.with_storefront(storefront);
        }
        if let Some(user_agent) = non_empty_env("APPLEMUSIC_USER_AGENT") {
            config = config.with_user_agent(user_agent);
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_storefront(mut self, storefront: impl Into<String>) -> Self {
        self.storefront = storefront.into().to_lowercase();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Search results page for a free-text term.
    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}/{}/search?term={}",
            self.base_url,
            self.storefront,
            urlencoding::encode(term)
        )
    }

    /// Canonical song page for a slug and numeric identifier.
    pub fn song_url(&self, slug: &str, id: &str) -> String {
        format!("{}/{}/song/{}/{}", self.base_url, self.storefront, slug, id)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ClientConfig::default();
        assert_eq!(
            config.search_url("a&b"),
            "https://music.apple.com/us/search?term=a%26b"
        );
        assert_eq!(
            config.song_url("one-more-time", "697195787"),
            "https://music.apple.com/us/song/one-more-time/697195787"
        );
    }

    #[test]
    fn test_builder_normalizes_values() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_storefront("JP");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.storefront, "jp");
    }
}

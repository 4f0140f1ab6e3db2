use http_client::Request;

/// Desktop browser user agent sent with every storefront request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Add the identifying browser header to a request.
///
/// The storefront serves its full server-rendered pages to desktop browsers only,
/// so this is the single header we send. No cookies, no auth.
pub fn add_browser_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_types::{Method, Url};

    #[test]
    fn test_only_user_agent_is_set() {
        let url: Url = "https://music.apple.com/us/search?term=x".parse().unwrap();
        let mut request = Request::new(Method::Get, url);
        add_browser_headers(&mut request, USER_AGENT);

        assert_eq!(request.header("User-Agent").unwrap().last().as_str(), USER_AGENT);
        assert!(request.header("Cookie").is_none());
    }
}

mod common;

use applemusic_meta::{AppleMusicError, FALLBACK_THUMBNAIL, UNKNOWN_ARTIST};
use common::{client_for, FixtureClient, SEARCH_HTML, SEARCH_NO_TRACKS_HTML};

const SEARCH_URL: &str = "https://music.apple.com/us/search?term=one%20more%20time";

#[test_log::test(tokio::test)]
async fn test_search_maps_track_lockup_items() {
    let client = client_for(FixtureClient::new().with_page(SEARCH_URL, SEARCH_HTML));

    let tracks = client.search("one more time").await.unwrap();

    // The string entry in the shelf is skipped, the other two are kept in order.
    assert_eq!(tracks.len(), 2);

    let first = &tracks[0];
    assert_eq!(first.id, "697195787");
    assert_eq!(first.title, "One More Time");
    assert_eq!(first.artist, "Daft Punk");
    assert_eq!(first.duration, "5:20");
    assert_eq!(
        first.url,
        "https://music.apple.com/us/song/one-more-time/697195787"
    );
    assert_eq!(
        first.thumbnail,
        "https://is1-ssl.mzstatic.com/image/thumb/Music/discovery/1400x1400bb.jpg"
    );
}

#[test_log::test(tokio::test)]
async fn test_search_items_degrade_to_defaults() {
    let client = client_for(FixtureClient::new().with_page(SEARCH_URL, SEARCH_HTML));

    let tracks = client.search("one more time").await.unwrap();
    let live = &tracks[1];

    assert_eq!(live.id, "1440123456");
    assert_eq!(live.duration, "0:00");
    assert_eq!(live.artist, UNKNOWN_ARTIST);
    assert_eq!(live.thumbnail, FALLBACK_THUMBNAIL);
}

#[test_log::test(tokio::test)]
async fn test_search_without_track_section_is_not_found() {
    let url = "https://music.apple.com/us/search?term=zzzz";
    let client = client_for(FixtureClient::new().with_page(url, SEARCH_NO_TRACKS_HTML));

    let result = client.search("zzzz").await;
    assert!(matches!(result, Err(AppleMusicError::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn test_search_with_malformed_payload_is_parse_error() {
    let url = "https://music.apple.com/us/search?term=broken";
    let html = r#"<html><body><script id="serialized-server-data">[{"data":</script></body></html>"#;
    let client = client_for(FixtureClient::new().with_page(url, html));

    let result = client.search("broken").await;
    assert!(matches!(result, Err(AppleMusicError::Parse(_))));
}

#[test_log::test(tokio::test)]
async fn test_search_term_is_url_encoded() {
    let fixtures = FixtureClient::new();
    let log = fixtures.request_log();
    let client = client_for(fixtures);

    let _ = client.search("AC/DC & friends").await;

    assert_eq!(
        common::requested_urls(&log),
        vec!["https://music.apple.com/us/search?term=AC%2FDC%20%26%20friends".to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn test_search_keeps_items_with_partial_artwork() {
    let url = "https://music.apple.com/us/search?term=partial";
    let html = r#"<html><body><script id="serialized-server-data">[{"data":{"sections":[
        {"id":"songs - 0","itemKind":"trackLockup","items":[
            {"title":"A","artwork":{"dictionary":{"width":600,"height":600}}},
            {"title":"B","artwork":{"dictionary":{"url":"https://img.example/{w}x{h}bb.{f}","width":100.0,"height":100.0}}},
            {"title":"C"}
        ]}
    ]}}]</script></body></html>"#;
    let client = client_for(FixtureClient::new().with_page(url, html));

    let tracks = client.search("partial").await.unwrap();

    let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(tracks[0].thumbnail, FALLBACK_THUMBNAIL);
    assert_eq!(tracks[1].thumbnail, "https://img.example/100x100bb.jpg");
    assert_eq!(tracks[2].thumbnail, FALLBACK_THUMBNAIL);
}

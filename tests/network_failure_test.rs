mod common;

use applemusic_meta::{AppleMusicError, StorefrontExtractor};
use common::{client_for, FixtureClient, SONG_HTML};
use http_types::StatusCode;

#[test_log::test(tokio::test)]
async fn test_every_extractor_degrades_on_network_error() {
    let client = client_for(FixtureClient::new());

    assert!(matches!(
        client.search("anything").await,
        Err(AppleMusicError::Http(_))
    ));
    assert!(matches!(
        client
            .get_song("https://music.apple.com/us/song/one-more-time/697195787")
            .await,
        Err(AppleMusicError::Http(_))
    ));
    assert!(matches!(
        client
            .get_album("https://music.apple.com/us/album/discovery/697194953")
            .await,
        Err(AppleMusicError::Http(_))
    ));
    assert!(matches!(
        client
            .get_playlist("https://music.apple.com/us/playlist/x/pl.u-abc")
            .await,
        Err(AppleMusicError::Http(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_error_status_is_treated_as_missing_page() {
    let url = "https://music.apple.com/us/song/one-more-time/697195787";
    let client = client_for(FixtureClient::new().with_status(
        url,
        StatusCode::NotFound,
        SONG_HTML,
    ));

    let extractor: &dyn StorefrontExtractor = &client;
    assert!(matches!(
        extractor.get_song(url).await,
        Err(AppleMusicError::Http(_))
    ));
}

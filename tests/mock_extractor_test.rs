#[cfg(feature = "mock")]
mod mock_tests {
    use applemusic_meta::stream::StreamSource;
    use applemusic_meta::{
        AppleMusicExtractor, ExtractorOptions, MockBridge, MockStorefrontExtractor,
        SearchContext, Track, FALLBACK_THUMBNAIL,
    };
    use mockall::predicate::*;

    fn track(title: &str) -> Track {
        Track {
            id: "697195787".to_string(),
            title: title.to_string(),
            artist: "Daft Punk".to_string(),
            duration: "5:20".to_string(),
            thumbnail: FALLBACK_THUMBNAIL.to_string(),
            url: "https://music.apple.com/us/song/one-more-time/697195787".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_search_results_become_host_tracks() {
        let mut mock = MockStorefrontExtractor::new();
        mock.expect_search()
            .with(eq("one more time"))
            .times(1)
            .returning(|_| Ok(vec![track("One More Time")]));
        mock.expect_get_playlist().never();

        let mut bridge = MockBridge::new();
        bridge
            .expect_bridge()
            .times(1)
            .returning(|t| Some(StreamSource::Url(format!("bridged:{}", t.title))));

        let facade = AppleMusicExtractor::activate(
            Box::new(mock),
            Box::new(bridge),
            ExtractorOptions::default(),
        );

        let response = facade
            .handle("one more time", &SearchContext::new("u"))
            .await;
        assert_eq!(response.tracks.len(), 1);
        assert_eq!(response.tracks[0].query_type, "appleMusicSearch");

        let source = facade.stream(&response.tracks[0]).await.unwrap();
        assert_eq!(source.url(), Some("bridged:One More Time"));
    }
}

#![allow(dead_code)]

pub mod mock_tts;
pub mod mocks;

use mock_tts::MockTts;
use mocks::{episode, MockEngine, MockFeed, MockShell};
use std::sync::Arc;
use std::time::Duration;
use voxhome::podcast::{PlaybackSettings, PodcastCatalog, PodcastController};

pub const TWIT_FEED: &str = "http://feeds.twit.tv/twit.xml";
pub const TWIG_FEED: &str = "http://feeds.twit.tv/twig.xml";
pub const EMPTY_FEED: &str = "http://feeds.example.com/empty.xml";
pub const VIDEO_FEED: &str = "http://feeds.example.com/video.xml";

/// A podcast controller wired to mocks
pub struct PodcastFixture {
    pub tts: Arc<MockTts>,
    pub engine: Arc<MockEngine>,
    pub feeds: Arc<MockFeed>,
    pub controller: Arc<PodcastController>,
}

pub fn catalog() -> PodcastCatalog {
    PodcastCatalog::new([
        ("this week in tech", TWIT_FEED),
        ("twig", TWIG_FEED),
        ("silent show", EMPTY_FEED),
        ("video show", VIDEO_FEED),
        ("missing show", "http://feeds.example.com/gone.xml"),
    ])
    .expect("test catalog is valid")
}

pub fn feeds() -> MockFeed {
    MockFeed::new()
        .with_feed(
            TWIT_FEED,
            vec![
                episode(
                    "TWiT 1000",
                    &["https://twit.tv/1000", "https://cdn.twit.tv/twit1000.mp3"],
                ),
                episode("TWiT 999", &["https://cdn.twit.tv/twit999.mp3"]),
            ],
        )
        .with_feed(
            TWIG_FEED,
            vec![episode("TWiG 1", &["https://cdn.twit.tv/twig1.mp3"])],
        )
        .with_feed(EMPTY_FEED, vec![])
        .with_feed(
            VIDEO_FEED,
            vec![episode("Video", &["https://example.com/ep.mp4"])],
        )
}

impl PodcastFixture {
    pub fn new() -> Self {
        Self::with_feeds(feeds())
    }

    pub fn with_feeds(feeds: MockFeed) -> Self {
        let tts = Arc::new(MockTts::new());
        let engine = Arc::new(MockEngine::new());
        let feeds = Arc::new(feeds);
        let settings = PlaybackSettings {
            audio_marker: ".mp3".into(),
            settle: Duration::ZERO,
        };
        let controller = Arc::new(PodcastController::new(
            "podcast",
            catalog(),
            settings,
            tts.clone(),
            engine.clone(),
            feeds.clone(),
        ));
        Self {
            tts,
            engine,
            feeds,
            controller,
        }
    }
}

pub fn shell() -> Arc<MockShell> {
    Arc::new(MockShell::new())
}

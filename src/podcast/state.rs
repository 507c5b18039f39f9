//! Playback state and request parsing

use rand::Rng;
use std::fmt;

/// Lifecycle stage of the podcast player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Starting,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Starting => "starting",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Which episode of a feed to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Entry 0, the most recent
    Latest,
    /// Uniformly random entry
    Random,
}

/// Pick an episode index in `[0, len)`. `None` for an empty feed.
pub fn select_episode<R: Rng + ?Sized>(len: usize, mode: SelectionMode, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match mode {
        SelectionMode::Latest => Some(0),
        SelectionMode::Random => Some(rng.gen_range(0..len)),
    }
}

/// Parsed podcast voice command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodcastCommand {
    Stop,
    Pause,
    Resume,
    Play { name: String, mode: SelectionMode },
}

impl PodcastCommand {
    /// Parse the recognized text after the trigger keyword.
    ///
    /// The text is lowercased, the first occurrence of the keyword removed and
    /// the rest trimmed. A `random` token anywhere in a play request selects a
    /// random episode and is removed from the name.
    pub fn parse(voice_command: &str, keyword: &str) -> Self {
        let command = voice_command
            .to_lowercase()
            .replacen(&keyword.to_lowercase(), "", 1)
            .trim()
            .to_string();

        match command.as_str() {
            "stop" | "off" => PodcastCommand::Stop,
            "pause" => PodcastCommand::Pause,
            "resume" => PodcastCommand::Resume,
            _ if command.contains("random") => PodcastCommand::Play {
                name: command.replacen("random", "", 1).trim().to_string(),
                mode: SelectionMode::Random,
            },
            _ => PodcastCommand::Play {
                name: command,
                mode: SelectionMode::Latest,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_control_words() {
        assert_eq!(PodcastCommand::parse("podcast stop", "podcast"), PodcastCommand::Stop);
        assert_eq!(PodcastCommand::parse("Podcast OFF", "podcast"), PodcastCommand::Stop);
        assert_eq!(PodcastCommand::parse("podcast pause ", "podcast"), PodcastCommand::Pause);
        assert_eq!(PodcastCommand::parse("resume podcast", "podcast"), PodcastCommand::Resume);
    }

    #[test]
    fn test_parse_play_request() {
        assert_eq!(
            PodcastCommand::parse("podcast This Week In Tech", "podcast"),
            PodcastCommand::Play {
                name: "this week in tech".into(),
                mode: SelectionMode::Latest,
            }
        );
        assert_eq!(
            PodcastCommand::parse("podcast twig", "podcast"),
            PodcastCommand::Play {
                name: "twig".into(),
                mode: SelectionMode::Latest,
            }
        );
    }

    #[test]
    fn test_parse_random_token_anywhere() {
        let expected = PodcastCommand::Play {
            name: "twig".into(),
            mode: SelectionMode::Random,
        };
        assert_eq!(PodcastCommand::parse("podcast random twig", "podcast"), expected);
        assert_eq!(PodcastCommand::parse("podcast twig random", "podcast"), expected);
    }

    #[test]
    fn test_select_latest_is_first_entry() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_episode(5, SelectionMode::Latest, &mut rng), Some(0));
        assert_eq!(select_episode(0, SelectionMode::Latest, &mut rng), None);
        assert_eq!(select_episode(0, SelectionMode::Random, &mut rng), None);
    }

    #[test]
    fn test_random_single_entry_always_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(select_episode(1, SelectionMode::Random, &mut rng), Some(0));
        }
    }

    #[test]
    fn test_random_selection_is_uniform_and_in_bounds() {
        const K: usize = 4;
        const TRIALS: usize = 40_000;
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; K];

        for _ in 0..TRIALS {
            let idx = select_episode(K, SelectionMode::Random, &mut rng).unwrap();
            assert!(idx < K);
            counts[idx] += 1;
        }

        let expected = TRIALS / K;
        for count in counts {
            // within 5% of the expected share
            assert!(count.abs_diff(expected) < expected / 20, "counts: {:?}", counts);
        }
    }
}

//! Keyword dispatch
//!
//! Matches recognized text against registered keyword phrases and runs the
//! bound action.

use crate::actions::Action;
use std::sync::Arc;
use tracing::{debug, info};

/// A keyword phrase bound to an action
#[derive(Clone)]
pub struct KeywordBinding {
    pub keyword: String,
    pub action: Arc<dyn Action>,
}

impl std::fmt::Debug for KeywordBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordBinding")
            .field("keyword", &self.keyword)
            .finish()
    }
}

/// Ordered keyword registry
#[derive(Debug, Default)]
pub struct Actor {
    bindings: Vec<KeywordBinding>,
}

impl Actor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `keyword` to `action`. Several keywords may share one action.
    pub fn add_keyword(&mut self, keyword: impl Into<String>, action: Arc<dyn Action>) {
        let keyword = keyword.into().to_lowercase();
        debug!("  + '{}'", keyword);
        self.bindings.push(KeywordBinding { keyword, action });
    }

    /// Registered keywords in match order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.keyword.as_str())
    }

    /// First binding, in registration order, whose keyword appears in `text`
    pub fn find(&self, text: &str) -> Option<&KeywordBinding> {
        let text_lower = text.to_lowercase();
        self.bindings
            .iter()
            .find(|binding| text_lower.contains(&binding.keyword))
    }

    /// Run the action matching `text`. Returns `false` when nothing matched.
    pub async fn dispatch(&self, text: &str) -> bool {
        match self.find(text) {
            Some(binding) => {
                info!("🎯 Matched keyword '{}' in '{}'", binding.keyword, text);
                binding.action.run(text).await;
                true
            }
            None => {
                debug!("No keyword matched for: '{}'", text);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        heard: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Action for Recorder {
        async fn run(&self, voice_command: &str) {
            self.heard.lock().unwrap().push(voice_command.to_string());
        }
    }

    #[tokio::test]
    async fn test_contains_match_is_case_insensitive() {
        let time = Arc::new(Recorder::default());
        let mut actor = Actor::new();
        actor.add_keyword("time", time.clone());

        assert!(actor.dispatch("please tell me the TIME now").await);
        assert_eq!(
            *time.heard.lock().unwrap(),
            vec!["please tell me the TIME now".to_string()]
        );
    }

    #[tokio::test]
    async fn test_first_registered_binding_wins() {
        let volume = Arc::new(Recorder::default());
        let max = Arc::new(Recorder::default());
        let mut actor = Actor::new();
        actor.add_keyword("volume", volume.clone());
        actor.add_keyword("max volume", max.clone());

        assert!(actor.dispatch("max volume please").await);
        assert_eq!(volume.heard.lock().unwrap().len(), 1);
        assert!(max.heard.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_silent() {
        let hello = Arc::new(Recorder::default());
        let mut actor = Actor::new();
        actor.add_keyword("hello", hello.clone());

        assert!(!actor.dispatch("what is the weather").await);
        assert!(!actor.dispatch("").await);
        assert!(hello.heard.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keywords_can_share_an_action() {
        let shared = Arc::new(Recorder::default());
        let mut actor = Actor::new();
        actor.add_keyword("Power Off", shared.clone());
        actor.add_keyword("shut down", shared.clone());

        assert_eq!(actor.keywords().collect::<Vec<_>>(), vec!["power off", "shut down"]);
        actor.dispatch("power off now").await;
        actor.dispatch("please shut down").await;
        assert_eq!(shared.heard.lock().unwrap().len(), 2);
    }
}

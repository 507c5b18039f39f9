//! Mock collaborators for the media engine, feeds, shell and GPIO

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use voxhome::error::VoxResult;
use voxhome::feed::{Episode, FeedSource};
use voxhome::gpio::DigitalInput;
use voxhome::players::{EngineState, MediaEngine};
use voxhome::shell::{ShellOutput, ShellRunner};

/// Media engine that records every call
pub struct MockEngine {
    pub calls: Mutex<Vec<String>>,
    state: Mutex<EngineState>,
    /// State reported after `play`; `Playing` unless overridden
    pub after_play: Mutex<EngineState>,
    pub fail_load: AtomicBool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(EngineState::NothingSpecial),
            after_play: Mutex::new(EngineState::Playing),
            fail_load: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose name starts with `name`
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(name))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MediaEngine for MockEngine {
    async fn load(&self, uri: &str) -> Result<()> {
        self.record(format!("load {}", uri));
        if self.fail_load.load(Ordering::SeqCst) {
            anyhow::bail!("unsupported media");
        }
        *self.state.lock().unwrap() = EngineState::Opening;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        self.record("play".into());
        *self.state.lock().unwrap() = *self.after_play.lock().unwrap();
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.record("pause".into());
        *self.state.lock().unwrap() = EngineState::Paused;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.record("stop".into());
        *self.state.lock().unwrap() = EngineState::Stopped;
        Ok(())
    }

    async fn state(&self) -> Result<EngineState> {
        Ok(*self.state.lock().unwrap())
    }

    fn name(&self) -> &str {
        "mock-engine"
    }
}

/// Feed source serving canned episodes by URL
pub struct MockFeed {
    pub feeds: HashMap<String, Vec<Episode>>,
    pub fetched: Mutex<Vec<String>>,
    /// Simulated download time
    pub delay: Duration,
}

impl MockFeed {
    pub fn new() -> Self {
        Self {
            feeds: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_feed(mut self, url: &str, episodes: Vec<Episode>) -> Self {
        self.feeds.insert(url.to_string(), episodes);
        self
    }
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn fetch(&self, url: &str) -> Result<Vec<Episode>> {
        self.fetched.lock().unwrap().push(url.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 for {}", url))
    }
}

/// Episode with the given links
pub fn episode(title: &str, links: &[&str]) -> Episode {
    Episode {
        title: title.to_string(),
        links: links.iter().map(|l| l.to_string()).collect(),
    }
}

/// Shell that answers from a script and records commands
pub struct MockShell {
    pub responses: Mutex<VecDeque<Result<ShellOutput, String>>>,
    pub commands: Mutex<Vec<String>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful command printing `stdout`
    pub fn then_output(self, stdout: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(ShellOutput {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
        }));
        self
    }

    /// Queue a command exiting with `code`
    pub fn then_exit(self, code: i32) -> Self {
        self.responses.lock().unwrap().push_back(Ok(ShellOutput {
            success: false,
            code: Some(code),
            stdout: String::new(),
        }));
        self
    }

    /// Queue a command that cannot be spawned
    pub fn then_fail(self, msg: &str) -> Self {
        self.responses.lock().unwrap().push_back(Err(msg.to_string()));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellRunner for MockShell {
    async fn run(&self, command: &str) -> Result<ShellOutput> {
        self.commands.lock().unwrap().push(command.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(msg)) => Err(anyhow::anyhow!(msg)),
            // unscripted commands succeed silently
            None => Ok(ShellOutput {
                success: true,
                code: Some(0),
                stdout: String::new(),
            }),
        }
    }
}

/// Input pin whose level is set by the test
#[derive(Default)]
pub struct MockPin {
    pub high: AtomicBool,
}

impl DigitalInput for MockPin {
    fn is_high(&self) -> VoxResult<bool> {
        Ok(self.high.load(Ordering::SeqCst))
    }
}

//! Command wiring
//!
//! Builds the keyword registry from configuration and exposes the
//! device-wide pause/resume hooks.

use crate::actions::{
    PowerAction, PowerCommand, RepeatAfterMe, SpeakAction, SpeakShellCommandOutput,
    SpeakTime, VolumeControl,
};
use crate::actor::Actor;
use crate::config::Config;
use crate::error::VoxResult;
use crate::feed::FeedSource;
use crate::gpio::DigitalInput;
use crate::players::MediaEngine;
use crate::podcast::{ButtonWatch, PlaybackSettings, PlaybackState, PodcastCatalog, PodcastController};
use crate::shell::ShellRunner;
use crate::tts::TtsEngine;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

const IP_ADDRESS: &str = "ip -4 route get 1 | head -1 | cut -d' ' -f8";

/// External collaborators the actions talk to
#[derive(Clone)]
pub struct Collaborators {
    pub tts: Arc<dyn TtsEngine>,
    pub shell: Arc<dyn ShellRunner>,
    pub engine: Arc<dyn MediaEngine>,
    pub feeds: Arc<dyn FeedSource>,
}

struct Button {
    input: Arc<dyn DigitalInput>,
    interval: Duration,
    watch: Mutex<Option<ButtonWatch>>,
}

/// The registry plus the stateful actions that outlive a single command
pub struct Assistant {
    actor: Actor,
    podcast: Arc<PodcastController>,
    button: Option<Button>,
}

/// Create an actor to carry out the user's commands
pub fn make_actor(config: &Config, deps: Collaborators) -> VoxResult<Assistant> {
    let Collaborators {
        tts,
        shell,
        engine,
        feeds,
    } = deps;
    let mut actor = Actor::new();

    actor.add_keyword(
        "ip address",
        Arc::new(SpeakShellCommandOutput::new(
            tts.clone(),
            shell.clone(),
            IP_ADDRESS,
            Some("I do not have an ip address assigned to me.".to_string()),
        )),
    );

    let step = config.volume_step;
    actor.add_keyword("volume up", Arc::new(VolumeControl::new(tts.clone(), shell.clone(), step)));
    actor.add_keyword("volume down", Arc::new(VolumeControl::new(tts.clone(), shell.clone(), -step)));
    actor.add_keyword("max volume", Arc::new(VolumeControl::new(tts.clone(), shell.clone(), 100)));

    actor.add_keyword(
        "repeat after me",
        Arc::new(RepeatAfterMe::new(tts.clone(), "repeat after me")),
    );

    let prefix = config.power_command_prefix.as_str();
    actor.add_keyword(
        "power off",
        Arc::new(PowerCommand::new(tts.clone(), shell.clone(), PowerAction::Shutdown, prefix)),
    );
    actor.add_keyword(
        "reboot",
        Arc::new(PowerCommand::new(tts.clone(), shell.clone(), PowerAction::Reboot, prefix)),
    );

    let catalog = PodcastCatalog::new(&config.podcasts)?;
    info!("🎙️ {} podcasts in catalog", catalog.len());
    let settings = PlaybackSettings {
        audio_marker: config.audio_marker.clone(),
        settle: Duration::from_millis(config.settle_ms),
    };
    let podcast = Arc::new(PodcastController::new(
        "podcast",
        catalog,
        settings,
        tts.clone(),
        engine,
        feeds,
    ));
    actor.add_keyword("podcast", podcast.clone());

    if config.cloud_speech_commands {
        add_cloud_speech_commands(&mut actor, &tts);
    }

    Ok(Assistant {
        actor,
        podcast,
        button: None,
    })
}

/// Canned replies and the time, for recognizers that return free-form text
fn add_cloud_speech_commands(actor: &mut Actor, tts: &Arc<dyn TtsEngine>) {
    let mut simple_command = |keyword: &str, response: &str| {
        actor.add_keyword(keyword, Arc::new(SpeakAction::new(tts.clone(), response)));
    };

    simple_command("alexa", "We've been friends since we were both starter projects");
    simple_command(
        "beatbox",
        "pv zk pv pv zk pv zk kz zk pv pv pv zk pv zk zk pzk pzk pvzkpkzvpvzk kkkkkk bsch",
    );
    simple_command("clap", "clap clap");
    simple_command("google home", "She taught me everything I know.");
    simple_command("hello", "hello to you too");
    simple_command(
        "tell me a joke",
        "What do you call an alligator in a vest? An investigator.",
    );
    simple_command(
        "three laws of robotics",
        "The laws of robotics are \
0: A robot may not injure a human being or, through inaction, allow a human \
being to come to harm. \
1: A robot must obey orders given it by human beings except where such orders \
would conflict with the First Law. \
2: A robot must protect its own existence as long as such protection does not \
conflict with the First or Second Law.",
    );
    simple_command(
        "where are you from",
        "A galaxy far, far, just kidding. I'm from Seattle.",
    );
    simple_command("your name", "A machine has no name");

    actor.add_keyword("time", Arc::new(SpeakTime::new(tts.clone())));
}

impl Assistant {
    /// Stop playback from a hardware button, polling every `interval`
    pub fn with_button(mut self, input: Arc<dyn DigitalInput>, interval: Duration) -> Self {
        self.button = Some(Button {
            input,
            interval,
            watch: Mutex::new(None),
        });
        self
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn podcast(&self) -> &Arc<PodcastController> {
        &self.podcast
    }

    /// Handle one recognized utterance
    pub async fn dispatch(&self, text: &str) -> VoxResult<bool> {
        let handled = self.actor.dispatch(text).await;
        self.sync_button().await?;
        Ok(handled)
    }

    /// Device paused: pause anything that is playing
    pub async fn pause_actors(&self) {
        self.podcast.pause().await;
    }

    /// Device resumed: resume anything that was paused
    pub async fn resume_actors(&self) {
        self.podcast.resume().await;
    }

    /// Keep a button watcher running exactly while a podcast is playing or paused
    async fn sync_button(&self) -> VoxResult<()> {
        let Some(button) = &self.button else {
            return Ok(());
        };
        let state = self.podcast.state().await;

        let mut slot = button.watch.lock()?;
        match state {
            PlaybackState::Playing | PlaybackState::Paused => {
                if slot.as_ref().is_some_and(|w| !w.is_finished()) {
                    return Ok(());
                }
                debug!("Arming stop button");
                *slot = Some(
                    self.podcast
                        .watch_button(button.input.clone(), button.interval),
                );
            }
            PlaybackState::Stopped | PlaybackState::Starting => {
                // Dropping the handle cancels the watcher
                if slot.take().is_some() {
                    debug!("Disarming stop button");
                }
            }
        }
        Ok(())
    }

    /// Whether a button watcher is currently running
    pub fn button_armed(&self) -> VoxResult<bool> {
        let Some(button) = &self.button else {
            return Ok(false);
        };
        let slot = button.watch.lock()?;
        Ok(slot.as_ref().is_some_and(|w| !w.is_finished()))
    }
}

//! Speak the current time

use super::Action;
use crate::tts::{say, TtsEngine};
use async_trait::async_trait;
use chrono::{Local, Timelike};
use std::sync::Arc;

const HRS_TEXT: [&str; 13] = [
    "midnight", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve",
];
const MINS_TEXT: [&str; 6] = ["five", "ten", "quarter", "twenty", "twenty-five", "half"];

/// Says the current local time, to the nearest five minutes
pub struct SpeakTime {
    tts: Arc<dyn TtsEngine>,
}

impl SpeakTime {
    pub fn new(tts: Arc<dyn TtsEngine>) -> Self {
        Self { tts }
    }

    /// Phrase a 24-hour time, e.g. `(4, 55)` → "It is five to five."
    pub fn to_str(hour: u32, minute: u32) -> String {
        let mut hour = hour % 24;
        let minute = minute % 60;

        // units of five minutes to the nearest hour
        let mut minute_rounded = (minute + 2) / 5;
        let minute_is_inverted = minute_rounded > 6;
        if minute_is_inverted {
            minute_rounded = 12 - minute_rounded;
            hour = (hour + 1) % 24;
        }

        if hour > 12 {
            hour -= 12;
        }

        let hour_text = HRS_TEXT[hour as usize];
        if minute_rounded == 0 {
            if hour == 0 {
                return "It is midnight.".to_string();
            }
            return format!("It is {} o'clock.", hour_text);
        }

        let minute_text = MINS_TEXT[minute_rounded as usize - 1];
        if minute_is_inverted {
            format!("It is {} to {}.", minute_text, hour_text)
        } else {
            format!("It is {} past {}.", minute_text, hour_text)
        }
    }
}

#[async_trait]
impl Action for SpeakTime {
    async fn run(&self, _voice_command: &str) {
        let now = Local::now();
        say(self.tts.as_ref(), &Self::to_str(now.hour(), now.minute())).await;
    }
}

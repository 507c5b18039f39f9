//! Digital input pins
//!
//! Reads a GPIO line through the sysfs interface. No debouncing or edge
//! detection is done here.

use crate::error::{VoxError, VoxResult};
use std::path::PathBuf;
use tracing::{debug, info};

/// A boolean input line
pub trait DigitalInput: Send + Sync {
    /// Current level of the pin
    fn is_high(&self) -> VoxResult<bool>;
}

/// GPIO pin exposed under `/sys/class/gpio`
#[derive(Debug, Clone)]
pub struct SysfsPin {
    pin: u32,
    root: PathBuf,
}

impl SysfsPin {
    pub fn new(pin: u32) -> Self {
        Self::with_root(pin, "/sys/class/gpio")
    }

    /// Use an alternate sysfs root
    pub fn with_root(pin: u32, root: impl Into<PathBuf>) -> Self {
        Self {
            pin,
            root: root.into(),
        }
    }

    fn pin_dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.pin))
    }

    /// Export the pin and configure it as an input
    pub fn export(&self) -> VoxResult<()> {
        if !self.pin_dir().exists() {
            std::fs::write(self.root.join("export"), self.pin.to_string()).map_err(|e| {
                VoxError::Gpio(format!("could not export pin {}: {}", self.pin, e))
            })?;
            info!("📌 Exported GPIO pin {}", self.pin);
        }
        std::fs::write(self.pin_dir().join("direction"), "in")
            .map_err(|e| VoxError::Gpio(format!("could not set pin {} as input: {}", self.pin, e)))?;
        Ok(())
    }
}

impl DigitalInput for SysfsPin {
    fn is_high(&self) -> VoxResult<bool> {
        let raw = std::fs::read_to_string(self.pin_dir().join("value"))?;
        let level = raw.trim() == "1";
        if level {
            debug!("GPIO pin {} is high", self.pin);
        }
        Ok(level)
    }
}

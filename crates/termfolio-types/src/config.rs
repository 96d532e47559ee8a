//! Runtime configuration loaded from `termfolio.toml`.
//!
//! ```toml
//! owner = "Ada Lovelace"
//! title = "ada@portfolio:~"
//! profile_path = "profile.json"
//! theme = "light"
//!
//! [showcase]
//! launch_ms = 7000
//! step_min_ms = 5000
//! step_max_ms = 9000
//! seed = 42
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermfolioError};

/// Terminal color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TermfolioConfig {
    /// Name in the welcome banner, shown before the profile has loaded.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Title bar text, also used as the prompt.
    #[serde(default = "default_title")]
    pub title: String,
    /// Profile JSON document. `None` uses the profile compiled into the binary.
    #[serde(default)]
    pub profile_path: Option<PathBuf>,
    /// Where the front-end writes its log (the terminal itself is in raw mode).
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    #[serde(default)]
    pub theme: Theme,
    /// Front-end frame interval in milliseconds.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default)]
    pub showcase: ShowcaseTimings,
}

fn default_owner() -> String {
    "Aryan Tomar".to_string()
}
fn default_title() -> String {
    "guest@portfolio:~".to_string()
}
fn default_log_path() -> PathBuf {
    PathBuf::from("termfolio.log")
}
fn default_frame_ms() -> u64 {
    33
}

impl Default for TermfolioConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            title: default_title(),
            profile_path: None,
            log_path: default_log_path(),
            theme: Theme::default(),
            frame_ms: default_frame_ms(),
            showcase: ShowcaseTimings::default(),
        }
    }
}

impl TermfolioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(TermfolioError::Config("frame_ms must be positive".into()));
        }
        self.showcase.validate()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

/// Pacing of the showcase run.
///
/// The step range is what makes the auto-typed commands look human; the
/// bounds are tunable, the defaults give a 5 to 9 second pause between sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShowcaseTimings {
    /// `start` until the profile scan begins: 4 s rocket animation plus 3 s
    /// settle.
    #[serde(default = "default_launch_ms")]
    pub launch_ms: u64,
    /// Scan banner until the photo appears.
    #[serde(default = "default_photo_ms")]
    pub photo_ms: u64,
    /// Photo until the detail stats appear and the sequence begins.
    #[serde(default = "default_details_ms")]
    pub details_ms: u64,
    /// Inclusive lower bound of the delay before each auto-typed command.
    #[serde(default = "default_step_min_ms")]
    pub step_min_ms: u64,
    /// Exclusive upper bound of the delay before each auto-typed command.
    #[serde(default = "default_step_max_ms")]
    pub step_max_ms: u64,
    /// Retry interval while the launch waits for the profile to arrive.
    #[serde(default = "default_profile_poll_ms")]
    pub profile_poll_ms: u64,
    /// Fixed RNG seed for reproducible pacing. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_launch_ms() -> u64 {
    7000
}
fn default_photo_ms() -> u64 {
    2000
}
fn default_details_ms() -> u64 {
    3000
}
fn default_step_min_ms() -> u64 {
    5000
}
fn default_step_max_ms() -> u64 {
    9000
}
fn default_profile_poll_ms() -> u64 {
    250
}

impl Default for ShowcaseTimings {
    fn default() -> Self {
        Self {
            launch_ms: default_launch_ms(),
            photo_ms: default_photo_ms(),
            details_ms: default_details_ms(),
            step_min_ms: default_step_min_ms(),
            step_max_ms: default_step_max_ms(),
            profile_poll_ms: default_profile_poll_ms(),
            seed: None,
        }
    }
}

impl ShowcaseTimings {
    pub fn validate(&self) -> Result<()> {
        if self.step_min_ms >= self.step_max_ms {
            return Err(TermfolioError::Config(format!(
                "showcase step range is empty: {}..{} ms",
                self.step_min_ms, self.step_max_ms
            )));
        }
        if self.profile_poll_ms == 0 {
            return Err(TermfolioError::Config(
                "showcase profile_poll_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn launch(&self) -> Duration {
        Duration::from_millis(self.launch_ms)
    }

    pub fn photo(&self) -> Duration {
        Duration::from_millis(self.photo_ms)
    }

    pub fn details(&self) -> Duration {
        Duration::from_millis(self.details_ms)
    }

    pub fn profile_poll(&self) -> Duration {
        Duration::from_millis(self.profile_poll_ms)
    }

    /// Step delay bounds in milliseconds, `min..max`.
    pub fn step_range(&self) -> std::ops::Range<u64> {
        self.step_min_ms..self.step_max_ms
    }
}

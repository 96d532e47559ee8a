//! The timed showcase: a scripted tour that auto-types every section command.
//!
//! `start` launches a run. The run walks a fixed phase sequence on timers,
//! and any real input cancels it. See [`Showcase`] for the driver.

mod orchestrator;
pub mod timer;

pub use orchestrator::{
    COMPLETE_BANNER, CONTINUE_HINT, DETAILS_BANNER, PHOTO_BANNER, SCAN_BANNER, Showcase,
    ShowcaseContext,
};

/// Where a showcase run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Countdown printed, rocket flying.
    Launching,
    /// Profile panel shown, photo not yet revealed.
    ScanningPhoto,
    /// Photo shown, stats not yet revealed.
    ScanningDetails,
    /// Auto-typing the section commands.
    RunningSequence,
    Complete,
    /// Interrupted by user input.
    Canceled,
}

impl Phase {
    /// Whether timers for this run may still fire.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Launching | Self::ScanningPhoto | Self::ScanningDetails | Self::RunningSequence
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Launching => "launching",
            Self::ScanningPhoto => "scanning-photo",
            Self::ScanningDetails => "scanning-details",
            Self::RunningSequence => "running-sequence",
            Self::Complete => "complete",
            Self::Canceled => "canceled",
        }
    }
}

/// What the view should draw around the terminal.
///
/// The flags only ever turn on during a run; cancelling hides the rocket
/// but leaves whatever was already revealed. `clear` and `start` reset them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowcaseView {
    pub rocket: bool,
    pub profile_panel: bool,
    pub photo: bool,
    pub details: bool,
}

/// Identity block shown once the details are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStats {
    pub id: u16,
}

impl AgentStats {
    pub const STATUS: &'static str = "ACTIVE";
    pub const CLEARANCE: &'static str = "LEVEL 5";
    pub const SPECIALIZATION: &'static str = "FULL STACK DEVELOPMENT";

    /// `DEV-NNNN`.
    pub fn agent_id(&self) -> String {
        format!("DEV-{}", self.id)
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> [(&'static str, String); 4] {
        [
            ("AGENT ID", self.agent_id()),
            ("STATUS", Self::STATUS.to_string()),
            ("CLEARANCE", Self::CLEARANCE.to_string()),
            ("SPECIALIZATION", Self::SPECIALIZATION.to_string()),
        ]
    }
}

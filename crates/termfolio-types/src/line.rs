//! Terminal line entries: the unit of output the interpreter produces and
//! the history log stores.

use serde::{Deserialize, Serialize};

use crate::profile::Project;

/// Display class of a line. The view picks colors and layout from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    System,
    SystemHighlight,
    SystemCountdown,
    SystemLiftoff,
    SystemScan,
    /// Echo of a command the user typed.
    Command,
    /// Echo of a command the showcase typed on the user's behalf.
    CommandAuto,
    Output,
    OutputCard,
    Error,
}

impl LineKind {
    /// Stable kebab-case tag, used for serialization and styling.
    pub fn tag(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::SystemHighlight => "system-highlight",
            Self::SystemCountdown => "system-countdown",
            Self::SystemLiftoff => "system-liftoff",
            Self::SystemScan => "system-scan",
            Self::Command => "command",
            Self::CommandAuto => "command-auto",
            Self::Output => "output",
            Self::OutputCard => "output-card",
            Self::Error => "error",
        }
    }
}

/// A project rendered as a card instead of a text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub is_live: bool,
    pub github: Option<String>,
    pub demo: Option<String>,
}

impl ProjectCard {
    /// Link to open when the card is activated: the demo if there is one,
    /// otherwise the source repository.
    pub fn activate(&self) -> Option<&str> {
        self.demo.as_deref().or(self.github.as_deref())
    }
}

impl From<&Project> for ProjectCard {
    fn from(p: &Project) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            is_live: p.is_live,
            github: p.github.clone(),
            demo: p.demo.clone(),
        }
    }
}

/// Line content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinePayload {
    Text(String),
    Card(ProjectCard),
}

/// One unit of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    pub payload: LinePayload,
    pub kind: LineKind,
}

impl LineEntry {
    pub fn text(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            payload: LinePayload::Text(text.into()),
            kind,
        }
    }

    pub fn card(card: ProjectCard) -> Self {
        Self {
            payload: LinePayload::Card(card),
            kind: LineKind::OutputCard,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::text(LineKind::System, text)
    }

    pub fn highlight(text: impl Into<String>) -> Self {
        Self::text(LineKind::SystemHighlight, text)
    }

    pub fn scan(text: impl Into<String>) -> Self {
        Self::text(LineKind::SystemScan, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::text(LineKind::Output, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::text(LineKind::Error, text)
    }

    /// Text of the line, or `None` for a card.
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            LinePayload::Text(t) => Some(t),
            LinePayload::Card(_) => None,
        }
    }

    pub fn as_card(&self) -> Option<&ProjectCard> {
        match &self.payload {
            LinePayload::Card(c) => Some(c),
            LinePayload::Text(_) => None,
        }
    }
}

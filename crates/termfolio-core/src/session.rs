//! One interactive session: interpreter, history, showcase, and profile.
//!
//! The session is the only thing the view talks to. It takes submitted
//! input, advances the showcase clock, and exposes the history and the
//! flags the view draws from.

use std::time::Duration;

use log::{error, info, warn};
use termfolio_terminal::{
    CommandOutput, CommandRegistry, Environment, HELP_HINT, register_builtins,
};
use termfolio_types::config::{TermfolioConfig, Theme};
use termfolio_types::error::{Result, TermfolioError};
use termfolio_types::line::{LineEntry, LineKind};
use termfolio_types::profile::ProfileRecord;

use crate::history::HistoryLog;
use crate::profile_source::{ProfileLoader, ProfileStatus};
use crate::showcase::{AgentStats, Phase, Showcase, ShowcaseContext, ShowcaseView};

/// Mutable per-session state shared by the interpreter and the showcase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub theme: Theme,
    pub phase: Phase,
    /// Next section the showcase will auto-type.
    pub cursor: usize,
    pub view: ShowcaseView,
    /// Drawn when the showcase reveals the detail stats.
    pub agent: Option<AgentStats>,
}

impl SessionState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            phase: Phase::Idle,
            cursor: 0,
            view: ShowcaseView::default(),
            agent: None,
        }
    }

    /// Forget everything about the last showcase run. The theme survives.
    pub fn clear_run(&mut self) {
        self.phase = Phase::Idle;
        self.cursor = 0;
        self.view = ShowcaseView::default();
        self.agent = None;
    }
}

/// Welcome banner printed at session start.
pub fn welcome_lines(owner: &str) -> Vec<LineEntry> {
    vec![
        LineEntry::system(format!("Welcome to {owner}'s Terminal Portfolio!")),
        LineEntry::system(HELP_HINT),
    ]
}

/// Interactive terminal session.
pub struct Session {
    registry: CommandRegistry,
    history: HistoryLog,
    state: SessionState,
    showcase: Showcase,
    profile: ProfileStatus,
    loader: Option<ProfileLoader>,
}

impl Session {
    /// A session whose profile is still loading.
    pub fn new(config: &TermfolioConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let mut history = HistoryLog::new();
        history.append(welcome_lines(&config.owner));
        Self {
            registry,
            history,
            state: SessionState::new(config.theme),
            showcase: Showcase::new(config.showcase.clone()),
            profile: ProfileStatus::Loading,
            loader: None,
        }
    }

    /// A session with the profile already in hand.
    pub fn with_profile(config: &TermfolioConfig, profile: ProfileRecord) -> Self {
        let mut session = Self::new(config);
        session.set_profile(Ok(profile));
        session
    }

    /// Hand the session a running loader; its result is picked up by
    /// `poll_profile()`.
    pub fn attach_loader(&mut self, loader: ProfileLoader) {
        self.loader = Some(loader);
    }

    /// Record the outcome of the profile fetch. Only the first outcome
    /// counts.
    pub fn set_profile(&mut self, result: Result<ProfileRecord>) {
        if !self.profile.is_loading() {
            warn!("ignoring second profile result");
            return;
        }
        match result {
            Ok(profile) => {
                info!("profile ready: {}", profile.personal.name);
                self.profile = ProfileStatus::Ready(profile);
            },
            Err(e) => {
                let detail = match e {
                    TermfolioError::Profile(msg) => msg,
                    other => other.to_string(),
                };
                let reason = format!("Failed to load profile data: {detail}");
                error!("{reason}");
                self.showcase.cancel(&mut self.state);
                self.history.push(LineEntry::error(format!("Error: {reason}")));
                self.profile = ProfileStatus::Failed(reason);
            },
        }
    }

    /// Pick up the loader's result if it has arrived.
    pub fn poll_profile(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let Some(result) = loader.try_recv() {
            self.loader = None;
            self.set_profile(result);
        }
    }

    /// Handle one line of user input.
    ///
    /// Blank input is ignored. Anything else cancels a running showcase,
    /// is echoed as a command line, and is interpreted.
    pub fn submit(&mut self, raw: &str) {
        if let ProfileStatus::Failed(reason) = &self.profile {
            warn!("input refused, profile unavailable: {reason}");
            return;
        }
        let input = raw.trim();
        if input.is_empty() {
            return;
        }
        self.showcase.cancel(&mut self.state);

        let env = environment(&self.profile);
        let echo = LineEntry::text(LineKind::Command, format!("$ {input}"));
        match self.registry.interpret(input, &env) {
            CommandOutput::Lines(lines) => {
                self.history.push(echo);
                self.history.append(lines);
            },
            CommandOutput::Reset => {
                self.showcase.reset(&mut self.state);
                self.history.reset();
            },
            CommandOutput::Launch(lines) => {
                self.history.push(echo);
                self.history.append(lines);
                self.showcase.launch(&mut self.state);
            },
        }
    }

    /// Advance the showcase clock by `dt`, firing every timer that comes
    /// due. Also picks up a finished profile fetch first.
    pub fn advance(&mut self, dt: Duration) {
        self.poll_profile();
        let mut ctx = ShowcaseContext {
            registry: &self.registry,
            env: environment(&self.profile),
            history: &mut self.history,
            state: &mut self.state,
        };
        self.showcase.advance(dt, &mut ctx);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        info!("theme switched to {:?}", self.state.theme);
        self.state.theme
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn view(&self) -> ShowcaseView {
        self.state.view
    }

    pub fn agent(&self) -> Option<AgentStats> {
        self.state.agent
    }

    pub fn profile(&self) -> &ProfileStatus {
        &self.profile
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Environment commands currently run against.
    pub fn environment(&self) -> Environment<'_> {
        environment(&self.profile)
    }

    /// Showcase timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.showcase.pending()
    }
}

fn environment(profile: &ProfileStatus) -> Environment<'_> {
    match profile.record() {
        Some(p) => Environment::with_profile(p),
        None => Environment::loading(),
    }
}

//! Showcase driver: phase transitions on a timer queue.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use termfolio_terminal::{CommandRegistry, Environment, SECTION_COMMANDS};
use termfolio_types::config::ShowcaseTimings;
use termfolio_types::line::{LineEntry, LineKind};

use super::timer::{TimerId, TimerQueue};
use super::{AgentStats, Phase, ShowcaseView};
use crate::history::HistoryLog;
use crate::session::SessionState;

pub const SCAN_BANNER: &str = "--- INITIATING PROFILE SCAN ---";
pub const PHOTO_BANNER: &str = "► Scanning agent photo...";
pub const DETAILS_BANNER: &str = "► Retrieving agent data...";
pub const COMPLETE_BANNER: &str = "--- PROFILE SCAN COMPLETE ---";
pub const CONTINUE_HINT: &str = "Type any command to continue...";

/// Everything a firing timer may touch.
pub struct ShowcaseContext<'a> {
    pub registry: &'a CommandRegistry,
    pub env: Environment<'a>,
    pub history: &'a mut HistoryLog,
    pub state: &'a mut SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    BeginScan,
    RevealPhoto,
    RevealDetails,
    NextSection,
}

#[derive(Debug, Clone, Copy)]
struct Tick {
    run: u64,
    step: Step,
}

/// Drives showcase runs.
///
/// Each run gets a new run number. Every timer it schedules is tracked, and
/// cancelling drops all of them at once; a tick that still arrives for an
/// older run is discarded on delivery.
pub struct Showcase {
    timings: ShowcaseTimings,
    timers: TimerQueue<Tick>,
    owned: Vec<TimerId>,
    run: u64,
    rng: StdRng,
}

impl Showcase {
    pub fn new(timings: ShowcaseTimings) -> Self {
        let rng = match timings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            timings,
            timers: TimerQueue::new(),
            owned: Vec::new(),
            run: 0,
            rng,
        }
    }

    /// Number of the most recent run (0 before the first `start`).
    pub fn run(&self) -> u64 {
        self.run
    }

    /// Timers still owned by the current run.
    pub fn pending(&self) -> usize {
        self.owned.len()
    }

    /// Virtual time of the showcase clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Start a new run, abandoning any run in flight.
    pub fn launch(&mut self, state: &mut SessionState) {
        self.drop_timers();
        self.run += 1;
        state.clear_run();
        state.phase = Phase::Launching;
        state.view.rocket = true;
        info!("showcase run {} launching", self.run);
        self.schedule(self.timings.launch(), Step::BeginScan);
    }

    /// Cancel the current run if one is active. Returns whether anything was
    /// cancelled.
    pub fn cancel(&mut self, state: &mut SessionState) -> bool {
        if !state.phase.is_active() {
            return false;
        }
        self.drop_timers();
        info!(
            "showcase run {} canceled during {}",
            self.run,
            state.phase.label()
        );
        state.phase = Phase::Canceled;
        state.view.rocket = false;
        true
    }

    /// Drop every timer and return the state to idle.
    pub fn reset(&mut self, state: &mut SessionState) {
        self.drop_timers();
        if state.phase != Phase::Idle {
            info!("showcase reset from {}", state.phase.label());
        }
        state.clear_run();
    }

    /// Move the showcase clock forward by `dt`, firing every timer that
    /// comes due, including timers scheduled by the ones that fire.
    pub fn advance(&mut self, dt: Duration, ctx: &mut ShowcaseContext<'_>) {
        let until = self.timers.now() + dt;
        while let Some((id, tick)) = self.timers.pop_due(until) {
            self.owned.retain(|owned| *owned != id);
            self.fire(tick, ctx);
        }
        self.timers.advance_to(until);
    }

    fn fire(&mut self, tick: Tick, ctx: &mut ShowcaseContext<'_>) {
        if tick.run != self.run || !ctx.state.phase.is_active() {
            debug!(
                "discarding stale {:?} from run {} (current run {})",
                tick.step, tick.run, self.run
            );
            return;
        }
        match tick.step {
            Step::BeginScan => self.begin_scan(ctx),
            Step::RevealPhoto => {
                ctx.state.phase = Phase::ScanningDetails;
                ctx.state.view.photo = true;
                ctx.history.push(LineEntry::scan(PHOTO_BANNER));
                info!("showcase run {}: photo revealed", self.run);
                self.schedule(self.timings.details(), Step::RevealDetails);
            },
            Step::RevealDetails => {
                let id = self.rng.gen_range(1000..=9999);
                ctx.state.phase = Phase::RunningSequence;
                ctx.state.cursor = 0;
                ctx.state.view.details = true;
                ctx.state.agent = Some(AgentStats { id });
                ctx.history.push(LineEntry::scan(DETAILS_BANNER));
                info!("showcase run {}: running sequence", self.run);
                self.schedule_section();
            },
            Step::NextSection => self.next_section(ctx),
        }
    }

    fn begin_scan(&mut self, ctx: &mut ShowcaseContext<'_>) {
        ctx.state.view.rocket = false;
        if ctx.env.profile.is_none() {
            debug!("showcase run {} waiting for profile", self.run);
            self.schedule(self.timings.profile_poll(), Step::BeginScan);
            return;
        }
        ctx.state.phase = Phase::ScanningPhoto;
        ctx.state.view.profile_panel = true;
        ctx.history.push(LineEntry::highlight(SCAN_BANNER));
        info!("showcase run {}: scanning", self.run);
        self.schedule(self.timings.photo(), Step::RevealPhoto);
    }

    fn next_section(&mut self, ctx: &mut ShowcaseContext<'_>) {
        let Some(section) = SECTION_COMMANDS.get(ctx.state.cursor) else {
            ctx.history.push(LineEntry::highlight(COMPLETE_BANNER));
            ctx.history.push(LineEntry::system(CONTINUE_HINT));
            ctx.state.phase = Phase::Complete;
            self.drop_timers();
            info!("showcase run {} complete", self.run);
            return;
        };
        let output = ctx.registry.interpret(section, &ctx.env);
        ctx.history
            .push(LineEntry::text(LineKind::CommandAuto, format!("$ {section}")));
        ctx.history.append(output.into_lines());
        ctx.state.cursor += 1;
        self.schedule_section();
    }

    fn schedule_section(&mut self) {
        let delay = self.rng.gen_range(self.timings.step_range());
        self.schedule(Duration::from_millis(delay), Step::NextSection);
    }

    fn schedule(&mut self, delay: Duration, step: Step) {
        let id = self.timers.schedule(
            delay,
            Tick {
                run: self.run,
                step,
            },
        );
        debug!("scheduled {step:?} for run {} in {delay:?}", self.run);
        self.owned.push(id);
    }

    fn drop_timers(&mut self) {
        if self.owned.is_empty() {
            return;
        }
        debug!("dropping {} showcase timers", self.owned.len());
        for id in self.owned.drain(..) {
            self.timers.cancel(id);
        }
    }
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("run", &self.run)
            .field("pending", &self.owned.len())
            .field("now", &self.timers.now())
            .finish()
    }
}

//! termfolio terminal entry point.
//!
//! A raw-mode crossterm front-end over a `termfolio_core::Session`: type
//! commands at the prompt, `start` launches the showcase.
//! Tab cycles project cards, Enter on an empty line opens the focused card,
//! F2 toggles the theme, Escape on an empty line or Ctrl-C quits.

mod app_state;
mod input;
mod launch;
mod layout;
mod render;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event;
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use app_state::AppState;
use input::InputResult;
use render::Renderer;
use termfolio_core::Session;
use termfolio_core::config::TermfolioConfig;
use termfolio_core::profile_source::{EmbeddedSource, JsonFileSource, ProfileLoader, ProfileStatus};

fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config.log_path)?;
    log::info!("Starting termfolio ({})", config.title);

    let mut session = Session::new(&config);
    let loader = match &config.profile_path {
        Some(path) => ProfileLoader::spawn(JsonFileSource::new(path))?,
        None => ProfileLoader::spawn(EmbeddedSource)?,
    };
    session.attach_loader(loader);
    let mut state = AppState::new(&config.title);

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode; run termfolio in a real terminal")?;
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to initialize terminal");
    }

    let result = run(&mut stdout, &config, &mut session, &mut state);
    let cleanup = restore_terminal(&mut stdout);
    result.and(cleanup)?;

    if let ProfileStatus::Failed(reason) = session.profile() {
        anyhow::bail!("{reason}");
    }
    log::info!("termfolio shut down cleanly");
    Ok(())
}

/// Resolve the config from the first CLI argument, then `TERMFOLIO_CONFIG`,
/// then built-in defaults.
fn load_config() -> Result<TermfolioConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMFOLIO_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => TermfolioConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(TermfolioConfig::default()),
    }
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn restore_terminal(stdout: &mut Stdout) -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout, ResetColor, Show, LeaveAlternateScreen)?;
    Ok(())
}

/// Frame loop: input, showcase clock, profile poll, draw.
fn run(
    stdout: &mut Stdout,
    config: &TermfolioConfig,
    session: &mut Session,
    state: &mut AppState,
) -> Result<()> {
    let frame = config.frame_interval();
    let mut renderer = Renderer::new();
    let mut last = Instant::now();

    loop {
        let mut timeout = frame;
        while event::poll(timeout)? {
            let ev = event::read()?;
            if let Some(e) = input::map_event(&ev)
                && input::handle_input(e, state, session) == InputResult::Quit
            {
                return Ok(());
            }
            timeout = Duration::ZERO;
        }

        let now = Instant::now();
        session.advance(now - last);
        last = now;

        if let ProfileStatus::Failed(reason) = session.profile() {
            log::error!("Exiting: {reason}");
            return Ok(());
        }

        state.sync(session.history());
        let (w, h) = terminal::size()?;
        let (w, h) = (w as usize, h as usize);
        let screen = layout::compose(session, state, w, h);
        renderer.draw(stdout, &screen, session.theme(), session.history().epoch(), w)?;
    }
}

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use termfolio_core::line::ProjectCard;

use crate::app_state::AppState;

/// Open a project card's link in the system browser and note it in the
/// status line.
pub fn activate_card(card: &ProjectCard, state: &mut AppState) {
    let Some(url) = card.activate() else {
        state.status = Some(format!("{} has no public link", card.name));
        return;
    };
    log::info!("Opening {url} for project {}", card.name);
    state.status = Some(match open_link(url) {
        Ok(()) => format!("Opening {url}"),
        Err(e) => {
            log::warn!("Could not open {url}: {e}");
            format!("Could not open a browser, visit {url}")
        },
    });
}

/// Hand a URL to the platform's opener without waiting for it.
pub fn open_link(url: &str) -> io::Result<()> {
    let (program, args) = opener();
    let mut cmd = Command::new(program);
    cmd.args(args).arg(url);
    // Dropping the handle detaches the reaper.
    spawn_reaped(&mut cmd)?;
    Ok(())
}

/// Spawn `cmd` with null stdio and wait for it on a named background thread,
/// so the child is reaped once it exits.
fn spawn_reaped(cmd: &mut Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    thread::Builder::new()
        .name("termfolio-opener".into())
        .spawn(move || {
            let status = child.wait();
            if let Ok(status) = &status
                && !status.success()
            {
                log::warn!("link opener exited with {status}");
            }
            status
        })
}

fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

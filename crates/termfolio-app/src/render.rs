//! Drawing frames to the terminal with crossterm.
//!
//! Frames are diffed row by row against what is already on screen; only
//! changed rows are rewritten. A theme switch, a resize, or a history reset
//! forces a full redraw.

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use termfolio_core::config::Theme;
use termfolio_core::line::LineKind;

use crate::layout::{Role, Row, Screen};

pub fn background(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::Black,
        Theme::Light => Color::White,
    }
}

/// Foreground color for a row.
pub fn foreground(role: Role, theme: Theme) -> Color {
    match theme {
        Theme::Dark => match role {
            Role::Title | Role::Prompt | Role::Panel => Color::Green,
            Role::Line(kind) => match kind {
                LineKind::System => Color::Green,
                LineKind::SystemHighlight => Color::Yellow,
                LineKind::SystemCountdown => Color::Magenta,
                LineKind::SystemLiftoff => Color::Red,
                LineKind::SystemScan => Color::Cyan,
                LineKind::Command | LineKind::OutputCard => Color::White,
                LineKind::CommandAuto => Color::Blue,
                LineKind::Output => Color::Grey,
                LineKind::Error => Color::DarkRed,
            },
            Role::CardTitle => Color::White,
            Role::CardFocused => Color::Yellow,
            Role::CardBody | Role::Blank => Color::Grey,
            Role::CardLinks => Color::DarkCyan,
            Role::Rocket => Color::Red,
            Role::Status => Color::DarkYellow,
        },
        Theme::Light => match role {
            Role::Title | Role::Prompt | Role::Panel => Color::DarkGreen,
            Role::Line(kind) => match kind {
                LineKind::System => Color::DarkGreen,
                LineKind::SystemHighlight => Color::DarkYellow,
                LineKind::SystemCountdown => Color::DarkMagenta,
                LineKind::SystemLiftoff => Color::Red,
                LineKind::SystemScan => Color::DarkCyan,
                LineKind::Command | LineKind::OutputCard => Color::Black,
                LineKind::CommandAuto => Color::DarkBlue,
                LineKind::Output => Color::DarkGrey,
                LineKind::Error => Color::DarkRed,
            },
            Role::CardTitle | Role::Blank => Color::Black,
            Role::CardFocused => Color::DarkBlue,
            Role::CardBody => Color::DarkGrey,
            Role::CardLinks => Color::DarkCyan,
            Role::Rocket => Color::DarkRed,
            Role::Status => Color::DarkYellow,
        },
    }
}

/// Which rows a frame needs to rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    Full,
    Rows(Vec<usize>),
}

/// Incremental frame writer.
#[derive(Debug, Default)]
pub struct Renderer {
    drawn: Vec<Row>,
    theme: Option<Theme>,
    epoch: u64,
    width: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a frame against the screen contents.
    pub fn plan(&self, screen: &Screen, theme: Theme, epoch: u64, width: usize) -> Redraw {
        if self.theme != Some(theme)
            || self.epoch != epoch
            || self.width != width
            || self.drawn.len() != screen.rows.len()
        {
            return Redraw::Full;
        }
        Redraw::Rows(
            screen
                .rows
                .iter()
                .zip(&self.drawn)
                .enumerate()
                .filter(|(_, (new, old))| new != old)
                .map(|(i, _)| i)
                .collect(),
        )
    }

    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        screen: &Screen,
        theme: Theme,
        epoch: u64,
        width: usize,
    ) -> io::Result<()> {
        let bg = background(theme);
        let rows = match self.plan(screen, theme, epoch, width) {
            Redraw::Full => {
                queue!(out, SetBackgroundColor(bg), Clear(ClearType::All))?;
                (0..screen.rows.len()).collect()
            },
            Redraw::Rows(rows) => rows,
        };
        for y in rows {
            let row = &screen.rows[y];
            queue!(
                out,
                MoveTo(0, y as u16),
                SetBackgroundColor(bg),
                SetForegroundColor(foreground(row.role, theme)),
                Print(&row.text),
                Clear(ClearType::UntilNewLine),
            )?;
        }
        let (x, y) = screen.cursor;
        queue!(out, MoveTo(x, y), Show)?;
        out.flush()?;

        self.drawn = screen.rows.clone();
        self.theme = Some(theme);
        self.epoch = epoch;
        self.width = width;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(lines: &[&str]) -> Screen {
        Screen {
            rows: lines
                .iter()
                .map(|l| Row {
                    text: l.to_string(),
                    role: Role::Line(LineKind::Output),
                })
                .collect(),
            cursor: (0, 0),
        }
    }

    #[test]
    fn first_frame_is_full() {
        let r = Renderer::new();
        assert_eq!(r.plan(&screen(&["a"]), Theme::Dark, 0, 80), Redraw::Full);
    }

    #[test]
    fn only_changed_rows_are_redrawn() {
        let mut r = Renderer::new();
        let mut out = Vec::new();
        r.draw(&mut out, &screen(&["a", "b", "c"]), Theme::Dark, 0, 80)
            .unwrap();
        assert_eq!(
            r.plan(&screen(&["a", "b", "c"]), Theme::Dark, 0, 80),
            Redraw::Rows(vec![])
        );
        assert_eq!(
            r.plan(&screen(&["a", "x", "c"]), Theme::Dark, 0, 80),
            Redraw::Rows(vec![1])
        );
    }

    #[test]
    fn theme_epoch_and_resize_force_full_redraw() {
        let mut r = Renderer::new();
        let s = screen(&["a", "b"]);
        r.draw(&mut Vec::new(), &s, Theme::Dark, 0, 80).unwrap();
        assert_eq!(r.plan(&s, Theme::Light, 0, 80), Redraw::Full);
        assert_eq!(r.plan(&s, Theme::Dark, 1, 80), Redraw::Full);
        assert_eq!(r.plan(&s, Theme::Dark, 0, 100), Redraw::Full);
        assert_eq!(r.plan(&screen(&["a"]), Theme::Dark, 0, 80), Redraw::Full);
    }

    #[test]
    fn unchanged_frame_writes_less() {
        let mut r = Renderer::new();
        let s = screen(&["hello world", "second row"]);
        let mut first = Vec::new();
        r.draw(&mut first, &s, Theme::Dark, 0, 80).unwrap();
        let mut second = Vec::new();
        r.draw(&mut second, &s, Theme::Dark, 0, 80).unwrap();
        assert!(second.len() < first.len());
        assert!(String::from_utf8_lossy(&first).contains("hello world"));
        assert!(!String::from_utf8_lossy(&second).contains("hello world"));
    }

    #[test]
    fn palettes_differ_between_themes() {
        for kind in [LineKind::System, LineKind::Command, LineKind::Output] {
            assert_ne!(
                foreground(Role::Line(kind), Theme::Dark),
                foreground(Role::Line(kind), Theme::Light)
            );
        }
        assert_ne!(background(Theme::Dark), background(Theme::Light));
    }
}

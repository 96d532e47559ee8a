//! Screen layout: the session projected onto a grid of text rows.
//!
//! Pure functions only. `render` turns the rows into terminal output.

use termfolio_core::config::Theme;
use termfolio_core::line::{LineKind, LinePayload, ProjectCard};
use termfolio_core::{HistoryLog, Session};

use crate::app_state::AppState;

/// What a row shows, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    Line(LineKind),
    CardTitle,
    CardFocused,
    CardBody,
    CardLinks,
    Rocket,
    Panel,
    Status,
    Prompt,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub role: Role,
}

impl Row {
    fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    fn blank() -> Self {
        Self::new(String::new(), Role::Blank)
    }
}

/// One full frame: exactly `height` rows plus the cursor cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub rows: Vec<Row>,
    pub cursor: (u16, u16),
}

const ROCKET: [&str; 6] = [
    "      /\\",
    "     /  \\",
    "    | () |",
    "    |    |",
    "   /|_/\\_|\\",
    "     ****",
];

/// Lay out a frame of `width` x `height` cells.
///
/// Top to bottom: title bar, showcase panel (while a run shows one), the
/// tail of the history, the status line, and the prompt.
pub fn compose(session: &Session, state: &AppState, width: usize, height: usize) -> Screen {
    let width = width.max(2);

    let mut bottom = Vec::new();
    if let Some(status) = &state.status {
        bottom.push(Row::new(clip(status, width), Role::Status));
    }
    let prompt = tail(&format!("{}$ {}", state.title, state.input_buf), width - 1);
    let cursor_col = prompt.chars().count();
    bottom.push(Row::new(prompt, Role::Prompt));

    let mut rows = vec![title_row(&state.title, session.theme(), width)];
    rows.extend(panel_rows(session, width));
    rows.truncate(height.saturating_sub(bottom.len()));

    let area = height.saturating_sub(rows.len() + bottom.len());
    let history = history_rows(session.history(), state.focused_card, width);
    let scroll = state.scroll.min(history.len().saturating_sub(area));
    let end = history.len() - scroll;
    let start = end.saturating_sub(area);
    rows.extend(history[start..end].iter().cloned());
    while rows.len() + bottom.len() < height {
        rows.push(Row::blank());
    }
    rows.extend(bottom);
    rows.truncate(height);

    let cursor_row = rows.len().saturating_sub(1);
    Screen {
        rows,
        cursor: (cursor_col as u16, cursor_row as u16),
    }
}

fn title_row(title: &str, theme: Theme, width: usize) -> Row {
    let theme = match theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    };
    let text = format!(" {title}  [{theme}]  F2 theme | Tab cards | Esc quit");
    Row::new(clip(&text, width), Role::Title)
}

fn panel_rows(session: &Session, width: usize) -> Vec<Row> {
    let view = session.view();
    let mut rows = Vec::new();
    if view.rocket {
        rows.extend(ROCKET.iter().map(|l| Row::new(clip(l, width), Role::Rocket)));
    }
    if view.profile_panel {
        let photo = match session.profile().record() {
            Some(p) if view.photo => format!("[ {} ]  {}", p.initials(), p.personal.name),
            _ => "[ .. ]  scanning...".to_string(),
        };
        rows.push(Row::new(clip(&photo, width), Role::Panel));
        if view.details
            && let Some(agent) = session.agent()
        {
            for (label, value) in agent.rows() {
                rows.push(Row::new(clip(&format!("  {label}: {value}"), width), Role::Panel));
            }
        }
        rows.push(Row::new("─".repeat(width), Role::Panel));
    }
    rows
}

/// Every history entry as display rows, wrapped to `width`.
pub fn history_rows(history: &HistoryLog, focused: Option<usize>, width: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut card_index = 0;
    for entry in history.entries() {
        match &entry.payload {
            LinePayload::Text(text) => rows.extend(
                wrap(text, width)
                    .into_iter()
                    .map(|t| Row::new(t, Role::Line(entry.kind))),
            ),
            LinePayload::Card(card) => {
                rows.extend(card_rows(card, focused == Some(card_index), width));
                card_index += 1;
            },
        }
    }
    rows
}

fn card_rows(card: &ProjectCard, focused: bool, width: usize) -> Vec<Row> {
    let badge = if card.is_live { " [Live]" } else { "" };
    let (marker, role) = if focused {
        ("▶ ", Role::CardFocused)
    } else {
        ("┌ ", Role::CardTitle)
    };
    let mut rows = vec![Row::new(
        clip(&format!("{marker}{}{badge}", card.name), width),
        role,
    )];
    rows.extend(
        wrap(&card.description, width.saturating_sub(2))
            .into_iter()
            .map(|t| Row::new(format!("│ {t}"), Role::CardBody)),
    );
    let links: Vec<String> = [("Source", &card.github), ("Demo", &card.demo)]
        .into_iter()
        .filter_map(|(label, url)| url.as_ref().map(|u| format!("{label}: {u}")))
        .collect();
    let footer = if links.is_empty() {
        "└".to_string()
    } else {
        format!("└ {}", links.join("  "))
    };
    rows.push(Row::new(clip(&footer, width), Role::CardLinks));
    rows
}

/// Word-wrap on spaces, hard-splitting words longer than `width`. Runs of
/// spaces inside a line are kept.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut len = 0;
    for word in text.split(' ') {
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            len = 0;
        } else if len > 0 {
            current.push(' ');
            len += 1;
        }
        for c in word.chars() {
            if len == width {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            current.push(c);
            len += 1;
        }
    }
    lines.push(current);
    lines
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Last `width` characters.
fn tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use termfolio_core::config::TermfolioConfig;
    use termfolio_core::line::LineEntry;
    use termfolio_core::profile_source::{EmbeddedSource, ProfileSource};

    fn session() -> Session {
        let mut config = TermfolioConfig::default();
        config.showcase.seed = Some(3);
        Session::with_profile(&config, EmbeddedSource.fetch().unwrap())
    }

    #[test]
    fn wrap_breaks_on_spaces() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("", 5), vec![""]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_keeps_column_padding() {
        let row = "about       skills      education";
        assert_eq!(wrap(row, 80), vec![row]);
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let text = "Developed to track the live location of devices in real-time, providing enhanced monitoring capabilities.";
        for width in 1..40 {
            assert!(wrap(text, width).iter().all(|l| l.chars().count() <= width), "{width}");
        }
    }

    #[test]
    fn frame_has_exact_height_and_prompt_last() {
        let session = session();
        let mut state = AppState::new("guest@portfolio:~");
        state.input_buf = "hel".into();
        let screen = compose(&session, &state, 60, 20);
        assert_eq!(screen.rows.len(), 20);
        assert_eq!(screen.rows[0].role, Role::Title);
        let prompt = screen.rows.last().unwrap();
        assert_eq!(prompt.text, "guest@portfolio:~$ hel");
        assert_eq!(screen.cursor, (22, 19));
        assert!(screen.rows.iter().any(|r| r.text.starts_with("Welcome to")));
    }

    #[test]
    fn long_prompt_shows_its_tail() {
        let session = session();
        let mut state = AppState::new("t");
        state.input_buf = "x".repeat(100);
        let screen = compose(&session, &state, 20, 5);
        let prompt = screen.rows.last().unwrap();
        assert_eq!(prompt.text.chars().count(), 19);
        assert_eq!(screen.cursor.0, 19);
    }

    #[test]
    fn cards_render_as_blocks_with_focus_marker() {
        let mut history = HistoryLog::new();
        history.push(LineEntry::card(ProjectCard {
            name: "Dash".into(),
            description: "Charts".into(),
            is_live: true,
            github: Some("https://git.example/dash".into()),
            demo: None,
        }));
        let rows = history_rows(&history, Some(0), 40);
        assert_eq!(rows[0].text, "▶ Dash [Live]");
        assert_eq!(rows[0].role, Role::CardFocused);
        assert_eq!(rows[1].text, "│ Charts");
        assert_eq!(rows[2].text, "└ Source: https://git.example/dash");

        let rows = history_rows(&history, None, 40);
        assert_eq!(rows[0].role, Role::CardTitle);
    }

    #[test]
    fn panel_appears_with_the_showcase() {
        let mut session = session();
        let state = AppState::new("t");
        session.submit("start");
        let screen = compose(&session, &state, 60, 40);
        assert!(screen.rows.iter().any(|r| r.role == Role::Rocket));

        session.advance(Duration::from_millis(12_000));
        let screen = compose(&session, &state, 60, 40);
        assert!(!screen.rows.iter().any(|r| r.role == Role::Rocket));
        let panel: Vec<&str> = screen
            .rows
            .iter()
            .filter(|r| r.role == Role::Panel)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(panel[0], "[ AT ]  ARYAN TOMAR");
        assert!(panel[1].starts_with("  AGENT ID: DEV-"));
        assert_eq!(panel[2], "  STATUS: ACTIVE");
    }

    #[test]
    fn scroll_is_clamped_to_history() {
        let session = session();
        let mut state = AppState::new("t");
        state.scroll = 1000;
        let screen = compose(&session, &state, 60, 10);
        assert_eq!(screen.rows.len(), 10);
        assert!(screen.rows[1].text.starts_with("Welcome to"));
    }

    #[test]
    fn tiny_terminal_keeps_prompt() {
        let mut session = session();
        session.submit("start");
        let state = AppState::new("t");
        let screen = compose(&session, &state, 30, 2);
        assert_eq!(screen.rows.len(), 2);
        assert_eq!(screen.rows[1].role, Role::Prompt);
    }
}

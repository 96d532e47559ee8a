//! Keyboard input: crossterm events mapped to termfolio input events, and
//! what each event does to the session.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termfolio_core::Session;

use crate::app_state::AppState;
use crate::launch;

/// Rows moved per PageUp / PageDown.
const SCROLL_STEP: usize = 10;

/// Input events the front-end reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    TextInput(char),
    Backspace,
    Confirm,
    FocusNext,
    FocusPrev,
    ToggleTheme,
    ScrollUp,
    ScrollDown,
    Cancel,
    Quit,
    Resize,
}

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Map a crossterm event to an input event.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        Event::Resize(..) => Some(InputEvent::Resize),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(InputEvent::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Tab => Some(InputEvent::FocusNext),
        KeyCode::BackTab => Some(InputEvent::FocusPrev),
        KeyCode::F(2) => Some(InputEvent::ToggleTheme),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::PageUp => Some(InputEvent::ScrollUp),
        KeyCode::PageDown => Some(InputEvent::ScrollDown),
        KeyCode::Char(c) => Some(InputEvent::TextInput(c)),
        _ => None,
    }
}

/// Apply one input event.
///
/// Only a submitted line reaches the session's interpreter; focus, theme
/// and scroll keys never cancel a running showcase.
pub fn handle_input(event: InputEvent, state: &mut AppState, session: &mut Session) -> InputResult {
    match event {
        InputEvent::Quit => return InputResult::Quit,
        InputEvent::Cancel if state.input_buf.is_empty() => return InputResult::Quit,
        InputEvent::Cancel => state.input_buf.clear(),
        InputEvent::TextInput(c) => state.input_buf.push(c),
        InputEvent::Backspace => {
            state.input_buf.pop();
        },
        InputEvent::Confirm => {
            if state.input_buf.trim().is_empty() {
                state.input_buf.clear();
                if let Some(card) = state.focused(session.history()).cloned() {
                    launch::activate_card(&card, state);
                }
            } else {
                let line = std::mem::take(&mut state.input_buf);
                session.submit(&line);
                state.scroll = 0;
                state.status = None;
            }
        },
        InputEvent::FocusNext => state.cycle_focus(session.history().cards().count(), true),
        InputEvent::FocusPrev => state.cycle_focus(session.history().cards().count(), false),
        InputEvent::ToggleTheme => {
            session.toggle_theme();
        },
        InputEvent::ScrollUp => state.scroll += SCROLL_STEP,
        InputEvent::ScrollDown => state.scroll = state.scroll.saturating_sub(SCROLL_STEP),
        InputEvent::Resize => {},
    }
    InputResult::Continue
}

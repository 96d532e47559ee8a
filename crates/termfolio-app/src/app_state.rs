use termfolio_core::HistoryLog;
use termfolio_core::line::ProjectCard;

/// View-side state: everything the front-end tracks that the session does
/// not.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Title bar text, also the prompt.
    pub title: String,
    pub input_buf: String,
    /// Index into the history's project cards, in log order.
    pub focused_card: Option<usize>,
    /// Rows scrolled back from the bottom of the history.
    pub scroll: usize,
    /// One-line notice under the history (opened links and the like).
    pub status: Option<String>,
    seen_epoch: u64,
}

impl AppState {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            input_buf: String::new(),
            focused_card: None,
            scroll: 0,
            status: None,
            seen_epoch: 0,
        }
    }

    /// Move card focus forward or back, wrapping around. With no cards the
    /// focus is cleared.
    pub fn cycle_focus(&mut self, card_count: usize, forward: bool) {
        if card_count == 0 {
            self.focused_card = None;
            return;
        }
        self.focused_card = Some(match (self.focused_card, forward) {
            (None, true) => 0,
            (None, false) => card_count - 1,
            (Some(i), true) => (i + 1) % card_count,
            (Some(i), false) => (i + card_count - 1) % card_count,
        });
    }

    /// Drop view state that no longer points at anything after the history
    /// changed.
    pub fn sync(&mut self, history: &HistoryLog) {
        if history.epoch() != self.seen_epoch {
            self.seen_epoch = history.epoch();
            self.focused_card = None;
            self.scroll = 0;
            self.status = None;
        }
        if let Some(i) = self.focused_card
            && i >= history.cards().count()
        {
            self.focused_card = None;
        }
    }

    pub fn focused<'a>(&self, history: &'a HistoryLog) -> Option<&'a ProjectCard> {
        history.cards().nth(self.focused_card?)
    }
}

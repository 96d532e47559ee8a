//! termfolio core.
//!
//! Session state, the append-only history log, the timed showcase
//! orchestrator, and profile loading. Front-ends drive a [`Session`] and
//! draw its history; they own no command semantics.

// Re-exports from termfolio-types (foundation types).
pub use termfolio_types::config;
pub use termfolio_types::error;
pub use termfolio_types::line;
pub use termfolio_types::profile;

pub use termfolio_terminal as terminal;

pub mod history;
pub mod profile_source;
pub mod session;
pub mod showcase;

pub use history::HistoryLog;
pub use session::{Session, SessionState};

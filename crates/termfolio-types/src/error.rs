//! Error types for termfolio.

use std::io;

/// Errors produced by the termfolio crates.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    /// Bad arguments or another problem local to one command.
    #[error("{0}")]
    Command(String),

    /// The first token did not name a registered command.
    #[error("Command not found: {0}")]
    UnknownCommand(String),

    /// The command reads the profile, which has not arrived yet.
    #[error("{0}: command not executed - profile data is loading...")]
    DataNotReady(String),

    #[error("profile error: {0}")]
    Profile(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermfolioError>;

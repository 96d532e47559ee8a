//! Command trait, registry, and dispatch logic.
//!
//! Input is trimmed, lower-cased and split on whitespace. The first token
//! selects the command; commands that read the profile are refused with an
//! inline error until the profile has arrived.

use std::collections::HashMap;

use termfolio_types::error::{Result, TermfolioError};
use termfolio_types::line::LineEntry;
use termfolio_types::profile::ProfileRecord;

use crate::section_commands::SECTION_COMMANDS;

/// Hint printed after an unknown command and in the welcome banner.
pub const HELP_HINT: &str = "Type \"help\" to see available commands.";

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Lines to append to the history, in order. May be empty.
    Lines(Vec<LineEntry>),
    /// Signal to empty the history and stop any running showcase.
    Reset,
    /// Signal to (re)start the showcase. Carries the countdown lines to
    /// print immediately.
    Launch(Vec<LineEntry>),
}

impl CommandOutput {
    /// No visible output.
    pub fn empty() -> Self {
        Self::Lines(Vec::new())
    }

    /// Lines this output prints, ignoring any signal.
    pub fn into_lines(self) -> Vec<LineEntry> {
        match self {
            Self::Lines(lines) | Self::Launch(lines) => lines,
            Self::Reset => Vec::new(),
        }
    }
}

/// Read-only context passed to every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment<'a> {
    /// The profile, once it has been fetched.
    pub profile: Option<&'a ProfileRecord>,
}

impl<'a> Environment<'a> {
    /// Environment for a session whose profile is still loading.
    pub fn loading() -> Self {
        Self { profile: None }
    }

    pub fn with_profile(profile: &'a ProfileRecord) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    /// The profile, or a data-not-ready error naming `command`.
    pub fn profile(&self, command: &str) -> Result<&'a ProfileRecord> {
        self.profile
            .ok_or_else(|| TermfolioError::DataNotReady(command.to_string()))
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cat \[file\]").
    fn usage(&self) -> &str;

    /// Command category. `help` highlights the "showcase" category.
    fn category(&self) -> &str {
        "general"
    }

    /// Whether the command reads the profile and must wait for it.
    fn requires_profile(&self) -> bool {
        true
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &Environment<'_>) -> Result<CommandOutput>;
}

/// Commands handled by the registry itself because they need registry access,
/// with the registered command their `help` row follows.
const INTERCEPTED: [(&str, &str, &str); 1] = [(
    "clear",
    "cat [file]",
    "View specific section in detail (e.g., cat projects)",
)];

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    /// Registration order, used for `help`.
    order: Vec<String>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name
    /// without changing its position in `help`.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_ascii_lowercase();
        if !self.commands.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.commands.insert(name, cmd);
    }

    /// Whether a command with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Interpret one line of input.
    ///
    /// Never fails: command errors become inline error lines.
    pub fn interpret(&self, raw: &str, env: &Environment<'_>) -> CommandOutput {
        match self.execute(raw, env) {
            Ok(output) => output,
            Err(e) => {
                log::debug!("command failed: {e}");
                CommandOutput::Lines(error_lines(&e))
            },
        }
    }

    /// Parse and execute a line, surfacing command errors.
    pub fn execute(&self, raw: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        let line = raw.trim().to_lowercase();
        let tokens = tokenize(&line);
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(CommandOutput::empty());
        };
        self.dispatch(&line, name, args, env)
    }

    /// Run `name` with `args`. Errors name the whole normalized `line`.
    fn dispatch(
        &self,
        line: &str,
        name: &str,
        args: &[&str],
        env: &Environment<'_>,
    ) -> Result<CommandOutput> {
        let cmd = self.commands.get(name);
        let requires_profile = match name {
            "help" => false,
            "cat" => true,
            _ => cmd.is_none_or(|c| c.requires_profile()),
        };
        if requires_profile && env.profile.is_none() {
            return Err(TermfolioError::DataNotReady(line.to_string()));
        }

        // Intercept built-in commands that need registry access.
        match name {
            "help" => return Ok(self.execute_help()),
            "cat" => return self.execute_cat(args, env),
            _ => {},
        }

        match cmd {
            Some(cmd) => cmd.execute(args, env),
            None => Err(TermfolioError::UnknownCommand(line.to_string())),
        }
    }

    // -- Intercepted commands --

    /// The static usage listing. Arguments are ignored.
    fn execute_help(&self) -> CommandOutput {
        let mut lines = vec![LineEntry::system("Available commands:")];
        for name in &self.order {
            let Some(cmd) = self.commands.get(name) else {
                continue;
            };
            let text = help_row(cmd.usage(), cmd.description());
            if cmd.category() == "showcase" {
                lines.push(LineEntry::highlight(text));
            } else {
                lines.push(LineEntry::system(text));
            }
            lines.extend(intercepted_rows(|after| *name == after));
        }
        // Rows whose anchor command is not registered go last.
        lines.extend(intercepted_rows(|after| !self.contains(after)));
        CommandOutput::Lines(lines)
    }

    /// `cat <section>` re-dispatches to the section command of that name.
    fn execute_cat(&self, args: &[&str], env: &Environment<'_>) -> Result<CommandOutput> {
        let [section] = args else {
            return Err(TermfolioError::Command("Usage: cat [section]".to_string()));
        };
        if SECTION_COMMANDS.contains(section) && self.contains(section) {
            self.dispatch(section, section, &[], env)
        } else {
            Err(TermfolioError::Command(format!("File not found: {section}")))
        }
    }
}

fn intercepted_rows(mut follows: impl FnMut(&str) -> bool) -> impl Iterator<Item = LineEntry> {
    INTERCEPTED
        .into_iter()
        .filter(move |(after, _, _)| follows(*after))
        .map(|(_, usage, description)| LineEntry::system(help_row(usage, description)))
}

fn help_row(usage: &str, description: &str) -> String {
    format!("{usage:<13}- {description}")
}

/// Lines shown for a failed command.
pub fn error_lines(err: &TermfolioError) -> Vec<LineEntry> {
    match err {
        TermfolioError::UnknownCommand(_) => {
            vec![LineEntry::error(err.to_string()), LineEntry::system(HELP_HINT)]
        },
        _ => vec![LineEntry::error(err.to_string())],
    }
}

/// Split a command line on whitespace.
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

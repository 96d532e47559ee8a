//! Built-in commands for the termfolio terminal.

use termfolio_types::error::Result;
use termfolio_types::line::{LineEntry, LineKind};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::section_commands::{SECTION_COMMANDS, register_section_commands};

/// Register all built-in commands into a registry.
///
/// Registration order is the order `help` lists them in. `help` and `cat`
/// are handled by the registry itself.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(StartCmd));
    register_section_commands(reg);
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(ExitCmd));
}

/// Countdown printed the moment `start` is typed.
pub fn liftoff_lines() -> Vec<LineEntry> {
    vec![
        LineEntry::highlight("Initiating launch sequence..."),
        LineEntry::text(LineKind::SystemCountdown, "3..."),
        LineEntry::text(LineKind::SystemCountdown, "2..."),
        LineEntry::text(LineKind::SystemCountdown, "1..."),
        LineEntry::text(LineKind::SystemLiftoff, "LIFTOFF!"),
    ]
}

// ---------------------------------------------------------------------------
// start
// ---------------------------------------------------------------------------

struct StartCmd;
impl Command for StartCmd {
    fn name(&self) -> &str {
        "start"
    }
    fn description(&self) -> &str {
        "Launch interactive portfolio showcase with animations"
    }
    fn usage(&self) -> &str {
        "start"
    }
    fn category(&self) -> &str {
        "showcase"
    }
    fn requires_profile(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Launch(liftoff_lines()))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn requires_profile(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Reset)
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

/// `ls` grid. Holds every entry of `SECTION_COMMANDS` exactly once.
const LS_ROWS: [&[&str]; 3] = [
    &["about", "education", "experience"],
    &["skills", "projects", "activities"],
    &["contact"],
];

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List all sections available"
    }
    fn usage(&self) -> &str {
        "ls"
    }
    fn execute(&self, _args: &[&str], _env: &Environment<'_>) -> Result<CommandOutput> {
        let lines = LS_ROWS
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|name| format!("{name:<12}")).collect();
                LineEntry::output(cells.concat().trim_end())
            })
            .collect();
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "\"Exit\" the terminal (just for fun)"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, _args: &[&str], _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(vec![
            LineEntry::system("Thank you for visiting my terminal portfolio!"),
            LineEntry::system("(This is just for fun, you can continue using the terminal)"),
        ]))
    }
}

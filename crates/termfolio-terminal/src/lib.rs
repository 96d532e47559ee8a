//! Command interpreter for termfolio.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The registry parses input
//! lines, resolves the command name, and dispatches `execute()`.

mod commands;
mod interpreter;
pub mod section_commands;

/// Register all built-in commands (showcase, sections, clear, ls, exit) into a registry.
pub use commands::{liftoff_lines, register_builtins};
/// A single executable command trait.
pub use interpreter::Command;
/// Output from a command: lines, or a reset / launch signal.
pub use interpreter::CommandOutput;
/// Registry that maps names to commands and dispatches input.
pub use interpreter::CommandRegistry;
/// Read-only context passed to commands.
pub use interpreter::Environment;
/// Hint line shown after unknown commands.
pub use interpreter::HELP_HINT;
pub use interpreter::{error_lines, tokenize};
/// The fixed section commands, in showcase order.
pub use section_commands::SECTION_COMMANDS;

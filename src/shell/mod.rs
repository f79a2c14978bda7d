//! Shell script execution.

pub mod command;
pub mod mock;

pub use command::{BashShell, CommandResult, ScriptShell, DEFAULT_SHELL};
pub use mock::{MockShell, RecordedScript};

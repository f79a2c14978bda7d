//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing parsed arguments

use crate::cli::args::Cli;
use crate::error::Result;
use crate::ui::UserInterface;

use super::run::RunCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
///
/// Failures are reported as errors, so a returned result always carries the
/// exit code of a completed command.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Routes parsed arguments to the command that handles them.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Build the command for `cli` and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        RunCommand::new(cli.run.clone()).execute(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert_eq!(result.exit_code, 0);
    }
}

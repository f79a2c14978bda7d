//! Run command implementation.
//!
//! `os-install <script>` groups the script into pieces and executes the ones
//! not yet completed, recording progress next to the script.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::args::RunArgs;
use crate::error::{InstallError, Result};
use crate::runner::{RunOptions, Runner};
use crate::script::group_file;
use crate::shell::{BashShell, ScriptShell};
use crate::state::{default_state_path, JsonFileBackend, StateBackend, StateStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
    shell: Box<dyn ScriptShell>,
}

impl RunCommand {
    /// Create a run command using the shell named in `args`.
    pub fn new(args: RunArgs) -> Self {
        let shell = Box::new(BashShell::with_program(args.shell.clone()));
        Self { args, shell }
    }

    /// Create a run command with a custom shell.
    pub fn with_shell(args: RunArgs, shell: Box<dyn ScriptShell>) -> Self {
        Self { args, shell }
    }

    /// Where progress for this script is recorded.
    pub fn state_path(&self) -> PathBuf {
        self.args
            .state_file
            .clone()
            .unwrap_or_else(|| default_state_path(&self.args.script))
    }

    fn open_store(&self) -> Result<StateStore> {
        let backend = JsonFileBackend::new(self.state_path());

        if self.args.new {
            if backend.exists() && !self.args.overwrite {
                return Err(InstallError::StateAlreadyExists {
                    path: backend.location(),
                });
            }
            debug!("Starting new installation state at {}", backend.location().display());
            Ok(StateStore::create(backend))
        } else {
            debug!("Resuming installation state from {}", backend.location().display());
            StateStore::open(backend)
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&format!("Scriptfile: {}", self.args.script.display()));
        ui.message(&format!("Config filepath: {}", self.state_path().display()));

        let mut store = self.open_store()?;
        let pieces = group_file(&self.args.script)?;

        let options = RunOptions {
            preview: self.args.preview,
        };
        let report = Runner::new(self.shell.as_ref(), options).run(&pieces, &mut store, ui)?;

        ui.success(&format!(
            "Installation complete: {} executed, {} already done",
            report.executed.len(),
            report.skipped.len()
        ));

        Ok(CommandResult::success())
    }
}

//! Shell script execution.

use crate::error::{InstallError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default interpreter for step scripts.
pub const DEFAULT_SHELL: &str = "bash";

/// Result of executing a script.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the script succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, duration: Duration) -> Self {
        Self {
            exit_code,
            duration,
            success: false,
        }
    }
}

/// Something that can run a script file to completion.
pub trait ScriptShell {
    /// Run the script at `path`, blocking until it exits.
    ///
    /// An unsuccessful exit is reported in the result, not as an error;
    /// errors mean the script could not be run at all.
    fn run_script(&self, path: &Path) -> Result<CommandResult>;
}

/// Runs scripts with an external interpreter, `bash` by default.
///
/// Output is not captured: the script inherits the terminal.
#[derive(Debug, Clone)]
pub struct BashShell {
    program: String,
}

impl BashShell {
    /// Use the default interpreter.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_SHELL)
    }

    /// Use a specific interpreter program.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The interpreter program.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for BashShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptShell for BashShell {
    fn run_script(&self, path: &Path) -> Result<CommandResult> {
        let start = Instant::now();
        debug!("Running {} {}", self.program, path.display());

        let status = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| InstallError::ShellUnavailable {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let duration = start.elapsed();

        if status.success() {
            Ok(CommandResult::success(duration))
        } else {
            Ok(CommandResult::failure(status.code(), duration))
        }
    }
}

//! Error types for installation runs.
//!
//! This module defines [`InstallError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (bad directives, duplicate names, state file
//!   mode mismatches) are detected before any step runs
//! - A failed step aborts the run but leaves it unmarked, so the next
//!   invocation resumes at exactly that step
//! - Library code never exits the process; `main` decides the exit code

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installation runs.
#[derive(Debug, Error)]
pub enum InstallError {
    /// A `# var` directive reused a name that was already declared.
    #[error("Var \"{name}\" already defined")]
    DuplicateVariable { name: String },

    /// A `# import` directive named a variable that was never declared.
    #[error("Can not import \"{name}\" because it is not defined")]
    UndeclaredVariableImport { name: String },

    /// More than one `## prolog` section in a script.
    #[error("Can not have multiple prologs")]
    MultipleProlog,

    /// Two script pieces share a name.
    #[error("Script piece \"{name}\" exists twice")]
    DuplicateStepName { name: String },

    /// `--new` was requested but state already exists.
    #[error("Config file \"{}\" already exists! Delete it to start new install.", path.display())]
    StateAlreadyExists { path: PathBuf },

    /// A resume was requested but there is no state to resume from.
    #[error("Config file \"{}\" does not exist", path.display())]
    StateNotFound { path: PathBuf },

    /// The state document could not be parsed.
    #[error("Failed to parse state at {}: {message}", path.display())]
    CorruptState { path: PathBuf, message: String },

    /// A step's script exited unsuccessfully.
    #[error("\"{step}\" in \"{}\" failed{}", script.display(), format_code(*code))]
    StepFailed {
        step: String,
        script: PathBuf,
        code: Option<i32>,
    },

    /// The shell program could not be started.
    #[error("Could not start shell '{program}': {message}")]
    ShellUnavailable { program: String, message: String },

    /// Input closed before a value for a variable was entered.
    #[error("No value entered for variable \"{name}\"")]
    PromptAborted { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

/// Result type alias for installation operations.
pub type Result<T> = std::result::Result<T, InstallError>;

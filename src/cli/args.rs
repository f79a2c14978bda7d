//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;

use clap::Parser;

use crate::shell::DEFAULT_SHELL;

/// os-install - Resumable, step-by-step installation scripts.
#[derive(Debug, Parser)]
#[command(name = "os-install")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Arguments for running an install script.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Install script to execute
    pub script: PathBuf,

    /// Start a new installation instead of resuming
    #[arg(long)]
    pub new: bool,

    /// Allow --new to replace an existing state file
    #[arg(long)]
    pub overwrite: bool,

    /// Print every script before executing it
    #[arg(long = "pp", visible_alias = "preview")]
    pub preview: bool,

    /// Shell used to execute step scripts
    #[arg(long, env = "OS_INSTALL_SHELL", default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// State file location (default: config-<script>.json next to the script)
    #[arg(long, env = "OS_INSTALL_STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

impl RunArgs {
    /// Arguments for resuming `script` with defaults everywhere else.
    pub fn for_script(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            new: false,
            overwrite: false,
            preview: false,
            shell: DEFAULT_SHELL.to_string(),
            state_file: None,
        }
    }
}

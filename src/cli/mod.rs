//! Command-line interface for os-install.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, RunCommand};

//! Command implementations.

pub mod dispatcher;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use run::RunCommand;

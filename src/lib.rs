//! os-install - Resumable installation scripts.
//!
//! os-install splits a shell script into named steps at `##` headings and
//! runs them one at a time, remembering which steps finished and which
//! values the operator typed in. Re-running after a failure picks up at the
//! failed step.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Step execution orchestration
//! - [`script`] - Script parsing and grouping into pieces
//! - [`shell`] - Shell script execution
//! - [`state`] - Persistent installation progress
//! - [`ui`] - Prompts and terminal output
//!
//! # Example
//!
//! ```
//! use os_install::runner::{RunOptions, Runner};
//! use os_install::script::group_script;
//! use os_install::shell::MockShell;
//! use os_install::state::{MemoryBackend, StateStore};
//! use os_install::ui::MockUI;
//!
//! let pieces = group_script("## greet\necho hello\n").unwrap();
//! let shell = MockShell::new();
//! let mut store = StateStore::create(MemoryBackend::new());
//! let mut ui = MockUI::new();
//!
//! Runner::new(&shell, RunOptions::default())
//!     .run(&pieces, &mut store, &mut ui)
//!     .unwrap();
//! assert!(store.is_completed("greet"));
//! ```

pub mod cli;
pub mod error;
pub mod runner;
pub mod script;
pub mod shell;
pub mod state;
pub mod ui;

pub use error::{InstallError, Result};

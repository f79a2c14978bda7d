//! Mock shell for testing.
//!
//! `MockShell` implements [`ScriptShell`] without spawning anything. It
//! records the content of every script it is asked to run and can be told
//! to fail scripts containing a given marker.
//!
//! # Example
//!
//! ```
//! use os_install::shell::MockShell;
//!
//! let shell = MockShell::new().failing_on("false");
//! assert_eq!(shell.calls(), 0);
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

use super::{CommandResult, ScriptShell};

/// A script the mock was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedScript {
    /// Path the script was written to.
    pub path: PathBuf,
    /// Script content at the time of the call.
    pub content: String,
}

/// Mock shell implementation for testing.
#[derive(Debug, Default)]
pub struct MockShell {
    fail_marker: Option<String>,
    exit_code: i32,
    recorded: RefCell<Vec<RecordedScript>>,
}

impl MockShell {
    /// A shell where every script succeeds.
    pub fn new() -> Self {
        Self {
            exit_code: 1,
            ..Default::default()
        }
    }

    /// Fail any script whose content contains `marker`.
    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    /// Exit code reported for failing scripts (default 1).
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Number of scripts run.
    pub fn calls(&self) -> usize {
        self.recorded.borrow().len()
    }

    /// Every script run, in order.
    pub fn recorded(&self) -> Vec<RecordedScript> {
        self.recorded.borrow().clone()
    }

    /// Content of every script run, in order.
    pub fn contents(&self) -> Vec<String> {
        self.recorded
            .borrow()
            .iter()
            .map(|r| r.content.clone())
            .collect()
    }
}

impl ScriptShell for MockShell {
    fn run_script(&self, path: &Path) -> Result<CommandResult> {
        let content = std::fs::read_to_string(path)?;
        let fails = self
            .fail_marker
            .as_deref()
            .is_some_and(|marker| content.contains(marker));

        self.recorded.borrow_mut().push(RecordedScript {
            path: path.to_path_buf(),
            content,
        });

        if fails {
            Ok(CommandResult::failure(Some(self.exit_code), Duration::ZERO))
        } else {
            Ok(CommandResult::success(Duration::ZERO))
        }
    }
}

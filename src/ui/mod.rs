//! Operator-facing user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for piped or headless runs
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use os_install::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("DISK", "/dev/sda");
//!
//! let value = ui.prompt(&Prompt::new("DISK", "Target disk")).unwrap();
//! assert_eq!(value, "/dev/sda");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use prompts::prompt_input;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, OutputTheme};

use std::io::IsTerminal;

use crate::error::Result;

/// Banner line framing echoed scripts.
pub const SCRIPT_BORDER: &str = "!!!!!!!!!!!!!!!!!!!!!!!";

/// Prefix for each echoed script line.
pub const SCRIPT_LINE_PREFIX: &str = "!! ";

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Ask the operator for a single line of input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<String>;

    /// Echo an assembled script for inspection.
    fn show_script(&mut self, lines: &[String]);
}

/// A prompt to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Unique key for the prompt (the variable name).
    pub key: String,
    /// The question to display.
    pub question: String,
}

impl Prompt {
    /// Create a prompt for `key` asking `question`.
    pub fn new(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
        }
    }

    /// The rendered prompt text, e.g. `> Target disk: `.
    pub fn label(&self) -> String {
        format!("> {}: ", self.question)
    }
}

/// Create the UI appropriate for the current environment.
///
/// The terminal UI is only used when both stdin and stdout are terminals;
/// anything else gets line-based prompts that work with piped input.
pub fn create_ui(interactive: bool) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::new())
    } else {
        Box::new(NonInteractiveUI::new())
    }
}

/// Whether stdin and stdout are both attached to a terminal.
pub fn is_interactive_session() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Render script lines in the echo format shared by all UIs.
pub fn format_script(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(SCRIPT_BORDER.to_string());
    out.extend(
        lines
            .iter()
            .map(|line| format!("{}{}", SCRIPT_LINE_PREFIX, line)),
    );
    out.push(SCRIPT_BORDER.to_string());
    out
}

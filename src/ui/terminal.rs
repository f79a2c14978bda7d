//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    format_script, prompt_input, should_use_colors, OutputTheme, Prompt, UserInterface,
    SCRIPT_BORDER,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: OutputTheme,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            OutputTheme::new()
        } else {
            OutputTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        let mut stderr = Term::stderr();
        writeln!(stderr, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "\n{}", self.theme.format_header(title)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_input(prompt, &self.term)
    }

    fn show_script(&mut self, lines: &[String]) {
        for line in format_script(lines) {
            let styled = if line == SCRIPT_BORDER {
                self.theme.border.apply_to(line).to_string()
            } else {
                self.theme.command.apply_to(line).to_string()
            };
            writeln!(self.term, "{}", styled).ok();
        }
    }
}

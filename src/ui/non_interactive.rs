//! Line-based UI for piped or headless runs.

use std::io::{self, BufRead, Write};

use crate::error::{InstallError, Result};

use super::{format_script, Prompt, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prompts are written to stdout and answered with one line from stdin,
/// so an install can be driven by `printf 'sda\nmybox\n' | os-install ...`.
pub struct NonInteractiveUI {
    input: Box<dyn BufRead>,
}

impl NonInteractiveUI {
    /// Create a UI reading answers from stdin.
    pub fn new() -> Self {
        Self {
            input: Box::new(io::BufReader::new(io::stdin())),
        }
    }

    /// Create a UI reading answers from `input` (for testing).
    pub fn with_input(input: impl BufRead + 'static) -> Self {
        Self {
            input: Box::new(input),
        }
    }
}

impl Default for NonInteractiveUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}", title);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt.label())?;
        stdout.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InstallError::PromptAborted {
                name: prompt.key.clone(),
            });
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }

    fn show_script(&mut self, lines: &[String]) {
        for line in format_script(lines) {
            println!("{}", line);
        }
    }
}

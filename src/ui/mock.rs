//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use os_install::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Start executing...");
//!
//! assert!(ui.has_message("Start executing"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::{InstallError, Result};

use super::{Prompt, UserInterface};

/// Mock UI implementation for testing.
///
/// Prompt keys without a configured response fail with `PromptAborted`,
/// the same way closed stdin does.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    scripts: Vec<Vec<String>>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response`.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get every script that was echoed.
    pub fn scripts(&self) -> &[Vec<String>] {
        &self.scripts
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(response);
            }
        }

        self.prompt_responses
            .get(&prompt.key)
            .cloned()
            .ok_or_else(|| InstallError::PromptAborted {
                name: prompt.key.clone(),
            })
    }

    fn show_script(&mut self, lines: &[String]) {
        self.scripts.push(lines.to_vec());
    }
}
